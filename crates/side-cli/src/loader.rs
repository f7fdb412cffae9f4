/// Line-oriented script format: one command per line, fields separated by
/// `|`, blank lines and `#` comments skipped. Placeholders stay untouched
/// here; substitution happens at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedCommand {
    pub(crate) name: String,
    pub(crate) args: Vec<String>,
}

pub(crate) fn parse_script(text: &str) -> Vec<ParsedCommand> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let mut fields = line.split('|').map(str::trim);
            let name = fields.next().unwrap_or_default().to_string();
            ParsedCommand {
                name,
                args: fields.map(str::to_string).collect(),
            }
        })
        .collect()
}
