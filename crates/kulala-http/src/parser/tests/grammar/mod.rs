mod bodies_tests;
mod requests_tests;
mod sections_tests;
