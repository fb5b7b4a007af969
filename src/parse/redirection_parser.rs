use crate::parse::{CommandSpec, OutputRedirection, Redirection};

/// Pull `<`, `>` and `>>` pairs out of an argument list.
///
/// An operator only counts when it is not the command name and a target
/// follows it; otherwise it stays in place as a literal argument.
pub fn resolve_redirections(args: Vec<String>) -> CommandSpec {
    let mut spec = CommandSpec::new();
    spec.args = args;
    let mut index = 1;
    while index + 1 < spec.args.len() {
        let Some(kind) = redirection_kind(&spec.args[index]) else {
            index += 1;
            continue;
        };
        spec.args.remove(index);
        let path = spec.args.remove(index);
        spec.redirections.push(kind.with_path(path));
    }
    spec
}

#[derive(Clone, Copy)]
enum RedirectionKind {
    Input,
    Truncate,
    Append,
}

impl RedirectionKind {
    fn with_path(self, path: String) -> Redirection {
        match self {
            RedirectionKind::Input => Redirection::Input(path),
            RedirectionKind::Truncate => Redirection::Output(OutputRedirection {
                path,
                append: false,
            }),
            RedirectionKind::Append => Redirection::Output(OutputRedirection { path, append: true }),
        }
    }
}

fn redirection_kind(token: &str) -> Option<RedirectionKind> {
    match token {
        "<" => Some(RedirectionKind::Input),
        ">" => Some(RedirectionKind::Truncate),
        ">>" => Some(RedirectionKind::Append),
        _ => None,
    }
}
