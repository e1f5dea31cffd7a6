use crate::api::{OptionDefinition, Registry};
use crate::constant::*;
use crate::model::OptionKind;
use crate::parser::UserInterface;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) struct Printer {
    description: Option<String>,
    usage: Option<String>,
    long_description: Option<String>,
    linux_vt: bool,
}

// Wraps text in escape sequences, or leaves it be when colours are off.
struct Style {
    colours: bool,
}

impl Style {
    fn wrap(&self, (start, end): (&str, &str), text: &str) -> String {
        if self.colours {
            format!("{start}{text}{end}")
        } else {
            text.to_string()
        }
    }

    fn colourise(&self, colour: &str, text: &str) -> String {
        if self.colours {
            format!("\x1b[{colour}m{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn highlight(&self, colour: &str) -> String {
        if self.colours {
            format!("\x1b[{colour};01m")
        } else {
            String::default()
        }
    }

    fn reset(&self) -> &'static str {
        if self.colours {
            RESET
        } else {
            ""
        }
    }

    fn plain(&self, text: &str) -> String {
        if self.colours {
            text.to_string()
        } else {
            strip_escapes(text)
        }
    }
}

/// Remove every escape sequence (`ESC` through the next `m`).
pub(crate) fn strip_escapes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('\x1b') {
        out.push_str(&rest[..start]);

        match rest[start..].find('m') {
            Some(end) => rest = &rest[start + end + 1..],
            None => rest = "",
        }
    }

    out.push_str(rest);
    out
}

// One synopsis row: the rendered alternatives and grammar, with '\0' marking where the highlight starts.
struct Row<'r> {
    line: String,
    width: usize,
    help: &'r str,
}

impl Printer {
    /// A printer for the current terminal, which draws the title dash in ASCII on the Linux VT.
    pub(crate) fn terminal(
        description: Option<String>,
        usage: Option<String>,
        long_description: Option<String>,
    ) -> Self {
        let linux_vt = std::env::var("TERM").map_or(false, |term| term == "linux");
        Self::new(description, usage, long_description, linux_vt)
    }

    pub(crate) fn new(
        description: Option<String>,
        usage: Option<String>,
        long_description: Option<String>,
        linux_vt: bool,
    ) -> Self {
        Self {
            description,
            usage,
            long_description,
            linux_vt,
        }
    }

    pub(crate) fn print_help(
        &self,
        program: &str,
        registry: &Registry,
        colours: bool,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        let style = Style { colours };

        let title = style.wrap(BOLD, program);
        match &self.description {
            Some(description) => {
                let dash = if self.linux_vt { "-" } else { "—" };
                user_interface.print(format!("{title} {dash} {description}"));
            }
            None => user_interface.print(title),
        }
        user_interface.print(String::default());

        if let Some(long_description) = &self.long_description {
            user_interface.print(style.plain(long_description));
        }
        user_interface.print(String::default());

        if let Some(usage) = &self.usage {
            for (i, line) in usage.split('\n').enumerate() {
                let lead = if i == 0 {
                    style.wrap(BOLD, "USAGE:")
                } else {
                    "    or".to_string()
                };
                user_interface.print(format!("{lead}\t{}", style.plain(line)));
            }

            user_interface.print(String::default());
        }

        user_interface.print(style.wrap(BOLD, "SYNOPSIS:"));
        let rows = synopsis(registry, &style);

        if let Some(widest) = rows.iter().map(|row| row.width).max() {
            // Align the help text to the next tab stop (after the 4 space indent).
            let column = widest + 8 - (widest.saturating_sub(4) & 7);

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Synopsis help column: {column}.");
            }

            for (index, row) in rows.iter().enumerate() {
                let colour = SYNOPSIS_COLOURS[index % SYNOPSIS_COLOURS.len()];
                let head = row.line.replace('\0', &style.highlight(colour));
                let padding = " ".repeat(column - row.width);

                for (j, line) in row.help.split('\n').enumerate() {
                    if j == 0 {
                        user_interface.print(format!("{head}{padding}{line}{}", style.reset()));
                    } else {
                        user_interface.print(format!(
                            "{}{}",
                            " ".repeat(column),
                            style.colourise(colour, line)
                        ));
                    }
                }
            }
        }

        user_interface.print(String::default());
    }
}

fn synopsis<'r>(registry: &'r Registry, style: &Style) -> Vec<Row<'r>> {
    let documented: Vec<(&OptionDefinition, &str)> = registry
        .options()
        .iter()
        .filter_map(|definition| definition.help().map(|help| (definition, help)))
        .collect();
    let first_width = documented
        .iter()
        .filter(|(definition, _)| definition.alternatives().len() > 1)
        .map(|(definition, _)| width(&definition.alternatives()[0]))
        .max()
        .unwrap_or(0);

    documented
        .into_iter()
        .map(|(definition, help)| {
            let alternatives = definition.alternatives();
            let first = if alternatives.len() > 1 {
                alternatives[0].as_str()
            } else {
                ""
            };
            let last = alternatives
                .last()
                .expect("internal error - a registered option must have an alternative");
            let first = format!("{first}{}", " ".repeat(first_width - width(first)));

            let mut line = format!("    {}  \0{last}", style.wrap(DIM, &first));
            let mut row_width = width(&first) + 6 + width(last);
            let argument = definition.argument().unwrap_or(DEFAULT_ARGUMENT);
            let emphasized = style.wrap(EMPHASIS, argument);

            match definition.kind() {
                OptionKind::Argumentless => {}
                OptionKind::Argumented => {
                    line.push_str(&format!(" {emphasized}"));
                    row_width += width(argument) + 1;
                }
                OptionKind::OptArgumented => {
                    line.push_str(&format!(" [{emphasized}]"));
                    row_width += width(argument) + 3;
                }
                OptionKind::Variadic => {
                    line.push_str(&format!(" [{emphasized}...]"));
                    row_width += width(argument) + 6;
                }
            }

            Row {
                line,
                width: row_width,
                help,
            }
        })
        .collect()
}

fn width(text: &str) -> usize {
    text.chars().count()
}
