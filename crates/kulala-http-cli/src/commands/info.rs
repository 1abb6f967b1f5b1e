use kulala_http::Language;

pub fn run() {
    print!("{}", render(&kulala_http::language()));
}

pub fn render(language: &Language) -> String {
    format!(
        "name: {}\nabi version: {}\nnode kinds: {}\nfields: {}\n",
        language.name(),
        language.abi_version(),
        language.node_kind_count(),
        language.field_count(),
    )
}
