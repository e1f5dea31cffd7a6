use affix::{
    ArgParser, Argumented, Argumentless, CommandLineParser, OptArgumented, ParseResult,
    StandardAbbreviations, Syntax, TriggerError, Variadic,
};

const LONG_DESCRIPTION: &str = "A demonstration of \x1b[01maffix\x1b[21m.\n\
\n\
Options may be abbreviated (ex: --hel for --hello), short options may be\n\
clustered (ex: -?l3), and --lines captures every remaining token.";

fn main() {
    let parser = configure();

    let result = match parser.parse(Syntax::Conventional) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    };

    run(&parser, result);
}

fn configure<'a>() -> ArgParser<'a> {
    CommandLineParser::new("demo")
        .description("A test for affix")
        .usage("demo [options] [files]\ndemo --lines LINE...")
        .long_description(LONG_DESCRIPTION)
        .abbreviations(StandardAbbreviations)
        .add(Argumentless::new(["-h", "-?", "--help"]).help("Prints this help message\n(and exits)"))
        .add(Argumentless::new(["--hello"]).help("Prints the text: hello world"))
        .add(Argumentless::new(["++hidden"]))
        .add(
            Argumented::new(["-l", "--line"])
                .argument("LINE")
                .help("Prints the chosen line")
                .trigger(|_, _, value| match value {
                    Some(line) if line.is_empty() => {
                        Err(TriggerError("--line cannot be empty".to_string()))
                    }
                    _ => Ok(()),
                }),
        )
        .add(OptArgumented::new(["-L", "--Line"]).argument("LINE").help("Prints the chosen line"))
        .add(Variadic::new(["--l", "--lines"]).argument("LINE").help("Prints the chosen lines"))
        .build()
}

fn run(parser: &ArgParser, mut result: ParseResult) {
    result.support_alternatives();

    if result.is_used("-?") {
        parser.help(None);
    } else if result.success() && !result.arguments().is_empty() && result.files().is_empty() {
        for _ in 0..result.count("--hello") {
            println!("Hello World");
        }

        for line in result.values("--line").unwrap_or_default() {
            println!("{}", line.as_deref().unwrap_or("None"));
        }

        for line in result.values("--Line").unwrap_or_default() {
            println!("{}", line.as_deref().unwrap_or("None"));
        }

        if let Some(lines) = result.values("--l") {
            for line in lines {
                println!("{}", line.as_deref().unwrap_or("None"));
            }

            if lines.is_empty() {
                println!("--l(--lines) is used without any arguments");
            }
        }

        if result.is_used("++hidden") {
            println!("Congratulations, you have found the secret option!");
        }
    } else {
        println!(
            "Number of unrecognised options: {}",
            result.unrecognised_count()
        );
        println!("Entered message: {}", result.message().unwrap_or("None"));
        println!("Entered files:");

        for file in result.files() {
            println!("\t{file}");
        }
    }
}
