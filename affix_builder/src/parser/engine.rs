use std::collections::{HashMap, VecDeque};

use crate::abbreviation::Abbreviations;
use crate::api::{OptionDefinition, Registry, TriggerError};
use crate::constant::*;
use crate::model::{OptionKind, Syntax};
use crate::parser::{Occurrences, ParseResult, UserInterface};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
enum Queued {
    Token(String),
    // An abbreviation already expanded into a registered alternative (with its `=value`, if any).
    Expansion { name: String, value: Option<String> },
}

/// The state of a single scan over the tokens.
#[derive(Debug, Default)]
struct Scan {
    // Tokens still to be read; expansions are pushed back onto the front.
    queue: VecDeque<Queued>,
    // Recognised options (the alternative used), in encounter order.
    options: Vec<String>,
    // The value of each recognised option, aligned with `options`.
    // Trails `options` by the number of options still waiting on a detached value.
    values: Vec<Option<String>>,
    files: Vec<String>,
    // Number of recognised options waiting on a detached value.
    pending: usize,
    // Every remaining token is positional.
    dashed: bool,
    // Exactly the next token is positional.
    escape_next: bool,
    unrecognised: usize,
}

impl Scan {
    fn new(tokens: &[&str]) -> Self {
        Self {
            queue: tokens
                .iter()
                .map(|token| Queued::Token(token.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    fn record(&mut self, used: &str, value: Option<String>) {
        self.options.push(used.to_string());
        self.values.push(value);
    }

    fn defer(&mut self, used: &str) {
        self.options.push(used.to_string());
        self.pending += 1;
    }
}

pub(crate) struct Engine<'r, 'a> {
    program: &'r str,
    registry: &'r Registry<'a>,
    abbreviations: &'r dyn Abbreviations,
    user_interface: &'r dyn UserInterface,
    alternatives: Vec<&'r str>,
    standards: HashMap<&'r str, &'r str>,
}

impl<'r, 'a> Engine<'r, 'a> {
    pub(crate) fn new(
        program: &'r str,
        registry: &'r Registry<'a>,
        abbreviations: &'r dyn Abbreviations,
        user_interface: &'r dyn UserInterface,
    ) -> Self {
        Self {
            program,
            registry,
            abbreviations,
            user_interface,
            alternatives: registry.alternatives().collect(),
            standards: registry.standards(),
        }
    }

    /// Scan the tokens, invoking triggers as options are recognised.
    ///
    /// Malformed input never fails the scan; it is reported and counted as unrecognised.
    /// Only a failing trigger stops the scan.
    pub(crate) fn run(&self, tokens: &[&str], syntax: Syntax) -> Result<ParseResult, TriggerError> {
        let mut scan = Scan::new(tokens);

        while let Some(queued) = scan.queue.pop_front() {
            let token = match queued {
                Queued::Token(token) => token,
                Queued::Expansion { name, value } => {
                    match value {
                        Some(value) => self.match_assignment(&mut scan, &name, &value)?,
                        None => self.match_exact(&mut scan, &name)?,
                    }

                    continue;
                }
            };
            let token = token.as_str();

            if scan.pending > 0 {
                let used = scan.options[scan.options.len() - scan.pending].clone();
                scan.pending -= 1;
                let definition = self.definition(&used);

                if definition.behaviour.accepts_detached(token) {
                    definition
                        .behaviour
                        .fire_value(&used, definition.standard(), token)?;
                    scan.values.push(Some(token.to_string()));
                    continue;
                }

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Option '{used}' declines '{token}' as its value.");
                }

                // The option goes without a value, and the token is read afresh.
                definition.behaviour.fire(&used, definition.standard())?;
                scan.values.push(None);
            }

            if scan.escape_next {
                scan.files.push(token.to_string());
                scan.escape_next = false;
            } else if scan.dashed {
                scan.files.push(token.to_string());
            } else if token == ESCAPE_NEXT {
                scan.escape_next = true;
            } else if token == END_OF_OPTIONS {
                scan.dashed = true;
            } else if is_option(token) {
                if syntax == Syntax::Alternative || is_long(token) {
                    self.match_long(&mut scan, token)?;
                } else {
                    self.match_cluster(&mut scan, token)?;
                }
            } else {
                scan.files.push(token.to_string());
            }
        }

        self.finish(scan, tokens)
    }

    fn match_long(&self, scan: &mut Scan, token: &str) -> Result<(), TriggerError> {
        if self.registry.kind_of(token) == Some(OptionKind::Argumentless) {
            return self.match_exact(scan, token);
        }

        if let Some((name, value)) = token.split_once('=') {
            let target = match self.registry.kind_of(name) {
                Some(kind) if kind != OptionKind::Argumentless => Some(name.to_string()),
                _ => self.expand(name, true),
            };

            match target {
                Some(target) if target == name => self.match_assignment(scan, name, value)?,
                // Queued resolved rather than as the text `target=value`, so `-c=1` is never re-read as a cluster.
                Some(target) => scan.queue.push_front(Queued::Expansion {
                    name: target,
                    value: Some(value.to_string()),
                }),
                None => self.unrecognised(scan, name),
            }

            return Ok(());
        }

        if self.registry.contains(token) {
            return self.match_exact(scan, token);
        }

        match self.expand(token, false) {
            Some(expanded) => scan.queue.push_front(Queued::Expansion {
                name: expanded,
                value: None,
            }),
            None => self.unrecognised(scan, token),
        }

        Ok(())
    }

    // A registered option, without a value attached.
    fn match_exact(&self, scan: &mut Scan, name: &str) -> Result<(), TriggerError> {
        let definition = self.definition(name);

        match definition.kind() {
            OptionKind::Argumentless => {
                definition.behaviour.fire(name, definition.standard())?;
                scan.record(name, None);
            }
            OptionKind::Argumented | OptionKind::OptArgumented => {
                scan.defer(name);
            }
            OptionKind::Variadic => {
                definition.behaviour.fire(name, definition.standard())?;
                scan.record(name, None);

                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Variadic option '{name}' claims the remaining tokens.");
                }

                scan.dashed = true;
            }
        }

        Ok(())
    }

    // A registered, value taking option in the form `name=value`.
    fn match_assignment(&self, scan: &mut Scan, name: &str, value: &str) -> Result<(), TriggerError> {
        let definition = self.definition(name);
        scan.record(name, Some(value.to_string()));

        if definition.kind() == OptionKind::Variadic {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Variadic option '{name}' claims the remaining tokens.");
            }

            scan.dashed = true;
            definition.behaviour.fire(name, definition.standard())
        } else {
            definition
                .behaviour
                .fire_value(name, definition.standard(), value)
        }
    }

    fn match_cluster(&self, scan: &mut Scan, token: &str) -> Result<(), TriggerError> {
        let mut characters = token.char_indices();
        let (_, sign) = characters
            .next()
            .expect("internal error - an option token must not be empty");

        for (offset, character) in characters {
            let name = format!("{sign}{character}");
            let remainder = &token[offset + character.len_utf8()..];

            let definition = match self.registry.get(&name) {
                Some(definition) => definition,
                None => {
                    self.unrecognised(scan, &name);
                    continue;
                }
            };

            match definition.kind() {
                OptionKind::Argumentless => {
                    definition.behaviour.fire(&name, definition.standard())?;
                    scan.record(&name, None);
                }
                OptionKind::Argumented | OptionKind::OptArgumented => {
                    if remainder.is_empty() {
                        scan.defer(&name);
                    } else {
                        scan.record(&name, Some(remainder.to_string()));
                        definition
                            .behaviour
                            .fire_value(&name, definition.standard(), remainder)?;
                    }

                    break;
                }
                OptionKind::Variadic => {
                    definition.behaviour.fire(&name, definition.standard())?;
                    let value = if remainder.is_empty() {
                        None
                    } else {
                        Some(remainder.to_string())
                    };
                    scan.record(&name, value);
                    scan.dashed = true;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Expand an abbreviation into a registered alternative.
    /// An option given a value (`--abbr=value`) may only expand into a value taking option.
    fn expand(&self, candidate: &str, with_value: bool) -> Option<String> {
        let expanded = self
            .abbreviations
            .expand(candidate, &self.alternatives, &self.standards)?;

        let accepted = match self.registry.kind_of(&expanded) {
            None => false,
            Some(OptionKind::Argumentless) => !with_value,
            Some(_) => true,
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Abbreviation '{candidate}' expands to '{expanded}' (accepted: {accepted}).");
        }

        if accepted {
            Some(expanded)
        } else {
            None
        }
    }

    fn unrecognised(&self, scan: &mut Scan, name: &str) {
        scan.unrecognised += 1;

        if scan.unrecognised <= UNRECOGNISED_REPORT_LIMIT {
            self.user_interface.print(format!(
                "{program}: warning: unrecognised option {name}",
                program = self.program
            ));
        }
    }

    fn finish(&self, scan: Scan, tokens: &[&str]) -> Result<ParseResult, TriggerError> {
        let Scan {
            options,
            values,
            mut files,
            unrecognised,
            ..
        } = scan;
        let mut captured: HashMap<String, Option<Occurrences>> = self
            .registry
            .options()
            .iter()
            .map(|definition| (definition.standard().to_string(), None))
            .collect();
        let mut values = values.into_iter();

        for used in &options {
            let definition = self.definition(used);
            let value = match values.next() {
                Some(value) => value,
                None => {
                    // The command line ended while this option waited on its value.
                    definition.behaviour.fire(used, definition.standard())?;
                    None
                }
            };

            captured
                .entry(definition.standard().to_string())
                .or_insert(None)
                .get_or_insert_with(Vec::default)
                .push(value);
        }

        // The first variadic option that was used takes the positional arguments.
        for definition in self.registry.options() {
            if definition.kind() != OptionKind::Variadic {
                continue;
            }

            if let Some(Some(occurrences)) = captured.get_mut(definition.standard()) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Variadic option '{}' absorbs {} positional argument(s).",
                        definition.standard(),
                        files.len()
                    );
                }

                let absorbed = files.drain(..).map(Some);

                if let Some(None) = occurrences.first() {
                    *occurrences = absorbed.collect();
                } else {
                    occurrences.extend(absorbed);
                }

                break;
            }
        }

        if unrecognised > UNRECOGNISED_REPORT_LIMIT {
            let more = unrecognised - UNRECOGNISED_REPORT_LIMIT;
            self.user_interface.print(format!(
                "{program}: warning: {more} more unrecognised {noun}",
                program = self.program,
                noun = if more == 1 { "option" } else { "options" },
            ));
        }

        let standards = self
            .standards
            .iter()
            .map(|(alternative, standard)| (alternative.to_string(), standard.to_string()))
            .collect();
        let mut result = ParseResult::new(
            tokens.iter().map(|token| token.to_string()).collect(),
            standards,
            captured,
        );
        result.message = if files.is_empty() {
            None
        } else {
            Some(files.join(" "))
        };
        result.files = files;
        result.unrecognised_count = unrecognised;
        Ok(result)
    }

    fn definition(&self, used: &str) -> &'r OptionDefinition<'a> {
        self.registry
            .get(used)
            .expect("internal error - a recognised option must be registered")
    }
}

fn is_option(token: &str) -> bool {
    token.len() > 1 && (token.starts_with('-') || token.starts_with('+'))
}

fn is_long(token: &str) -> bool {
    token.len() > 2 && (token.starts_with("--") || token.starts_with("++"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abbreviation::{NoAbbreviations, StandardAbbreviations};
    use crate::api::{Argumented, Argumentless, OptArgumented, Variadic};
    use crate::parser::Transcript;
    use rand::{seq::SliceRandom, Rng};
    use rstest::rstest;

    fn some(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    fn registry<'a>() -> Registry<'a> {
        let mut registry = Registry::new();
        registry.register(Argumentless::new(["-a"])).unwrap();
        registry.register(Argumentless::new(["-b", "--bee"])).unwrap();
        registry
            .register(Argumented::new(["-c", "--sea"]).argument("ARG"))
            .unwrap();
        registry
            .register(OptArgumented::new(["-o", "--opt"]).standard("--opt"))
            .unwrap();
        registry.register(Variadic::new(["-r", "--rest"])).unwrap();
        registry
    }

    fn run(registry: &Registry, tokens: &[&str], syntax: Syntax) -> (ParseResult, Vec<String>) {
        let transcript = Transcript::default();
        let engine = Engine::new("program", registry, &StandardAbbreviations, &transcript);
        let result = engine.run(tokens, syntax).unwrap();
        (result, transcript.lines())
    }

    #[test]
    fn empty() {
        let registry = registry();

        let (result, lines) = run(&registry, &[], Syntax::Conventional);

        assert!(result.success());
        assert!(result.files().is_empty());
        assert_eq!(result.message(), None);
        assert!(lines.is_empty());
        for standard in ["-a", "-b", "-c", "--opt", "-r"] {
            assert!(result.values.contains_key(standard));
            assert!(!result.is_used(standard));
        }
    }

    #[rstest]
    #[case(vec!["--", "-a", "b"])]
    #[case(vec!["--", "--sea", "x"])]
    #[case(vec!["--", "--", "++"])]
    fn dashed(#[case] tokens: Vec<&str>) {
        let registry = registry();

        let (result, _) = run(&registry, &tokens, Syntax::Conventional);

        assert_eq!(result.files(), &tokens[1..]);
        assert!(result.entries().all(|(_, occurrences)| occurrences.is_none()));
        assert!(result.success());
    }

    #[test]
    fn dashed_random() {
        let mut rng = rand::thread_rng();
        let pool = ["-a", "-abc", "--sea", "--sea=1", "-r", "++", "--", "x", "-", "+o", "--nope"];
        let registry = registry();

        for _ in 0..32 {
            let length = rng.gen_range(0..8);
            let mut tokens = vec!["--"];
            tokens.extend((0..length).map(|_| *pool.choose(&mut rng).unwrap()));

            let (result, lines) = run(&registry, &tokens, Syntax::Conventional);

            assert_eq!(result.files(), &tokens[1..]);
            assert!(lines.is_empty());
            assert!(result.entries().all(|(_, occurrences)| occurrences.is_none()));
        }
    }

    #[test]
    fn escape_next() {
        let registry = registry();

        let (result, _) = run(&registry, &["++", "-a"], Syntax::Conventional);

        assert_eq!(result.files(), &["-a"]);
        assert!(!result.is_used("-a"));
    }

    #[test]
    fn escape_next_once() {
        let registry = registry();

        let (result, _) = run(&registry, &["++", "--", "-a", "x"], Syntax::Conventional);

        assert_eq!(result.files(), &["--", "x"]);
        assert_eq!(result.count("-a"), 1);
        assert_eq!(result.message(), Some("-- x"));
    }

    #[rstest]
    #[case(vec!["-abc", "val"])]
    #[case(vec!["-abcval"])]
    #[case(vec!["-ab", "-c", "val"])]
    #[case(vec!["-a", "--bee", "--sea=val"])]
    #[case(vec!["-a", "-b", "--sea", "val"])]
    fn cluster(#[case] tokens: Vec<&str>) {
        let registry = registry();

        let (result, _) = run(&registry, &tokens, Syntax::Conventional);

        assert_eq!(result.values("-a"), Some(&[None][..]));
        assert_eq!(result.values("-b"), Some(&[None][..]));
        assert_eq!(result.values("-c"), Some(&some(&["val"])[..]));
        assert!(result.files().is_empty());
        assert!(result.success());
    }

    #[test]
    fn cluster_stuck_value_swallows_flags() {
        let registry = registry();

        let (result, _) = run(&registry, &["-cab"], Syntax::Conventional);

        assert_eq!(result.values("-c"), Some(&some(&["ab"])[..]));
        assert!(!result.is_used("-a"));
        assert!(!result.is_used("-b"));
    }

    #[test]
    fn cluster_unrecognised_continues() {
        let registry = registry();

        let (result, lines) = run(&registry, &["-axb"], Syntax::Conventional);

        assert_eq!(result.count("-a"), 1);
        assert_eq!(result.count("-b"), 1);
        assert_eq!(result.unrecognised_count(), 1);
        assert!(!result.success());
        assert_eq!(lines, vec!["program: warning: unrecognised option -x"]);
    }

    #[test]
    fn cluster_plus_sign() {
        let mut registry = Registry::new();
        registry.register(Argumentless::new(["+a", "-a"])).unwrap();
        registry.register(Argumented::new(["+c"])).unwrap();

        let (result, _) = run(&registry, &["+ac", "x", "-a"], Syntax::Conventional);

        assert_eq!(result.values("+a"), Some(&[None, None][..]));
        assert_eq!(result.values("+c"), Some(&some(&["x"])[..]));
    }

    #[rstest]
    #[case(vec!["++hidden"], 1, None)]
    #[case(vec!["++hidden", "++hidden", "y"], 2, None)]
    #[case(vec!["++out=x"], 0, Some(vec!["x"]))]
    #[case(vec!["++out", "y", "++hidden"], 1, Some(vec!["y"]))]
    #[case(vec!["++hid", "++ou", "z"], 1, Some(vec!["z"]))]
    fn long_plus_sign(
        #[case] tokens: Vec<&str>,
        #[case] expected_hidden: usize,
        #[case] expected_out: Option<Vec<&str>>,
    ) {
        let mut registry = Registry::new();
        registry.register(Argumentless::new(["++hidden"])).unwrap();
        registry.register(Argumented::new(["++out"])).unwrap();

        let (result, lines) = run(&registry, &tokens, Syntax::Conventional);

        assert_eq!(result.count("++hidden"), expected_hidden);
        assert_eq!(
            result.values("++out").map(<[Option<String>]>::to_vec),
            expected_out.map(|values| some(&values))
        );
        assert!(lines.is_empty());
    }

    #[test]
    fn argumented_missing_value() {
        let mut values: Vec<Option<String>> = Vec::default();
        {
            let mut registry = Registry::new();
            registry
                .register(Argumented::new(["--line"]).trigger(|_, _, value| {
                    values.push(value.map(str::to_string));
                    Ok(())
                }))
                .unwrap();

            let (result, _) = run(&registry, &["--line", "1", "--line"], Syntax::Conventional);

            assert_eq!(result.values("--line"), Some(&[Some("1".to_string()), None][..]));
        }

        assert_eq!(values, vec![Some("1".to_string()), None]);
    }

    #[test]
    fn argumented_takes_option_like_value() {
        let registry = registry();

        let (result, _) = run(&registry, &["--sea", "-a", "-c", "--bee"], Syntax::Conventional);

        assert_eq!(result.values("-c"), Some(&some(&["-a", "--bee"])[..]));
        assert!(!result.is_used("-a"));
        assert!(!result.is_used("-b"));
    }

    #[rstest]
    #[case(vec!["--opt", "v"], vec![Some("v")], vec![])]
    #[case(vec!["-ov"], vec![Some("v")], vec![])]
    #[case(vec!["-o-v"], vec![Some("-v")], vec![])]
    #[case(vec!["--opt=-v"], vec![Some("-v")], vec![])]
    #[case(vec!["--opt", "-a"], vec![None], vec!["-a"])]
    #[case(vec!["-o", "--bee"], vec![None], vec!["-b"])]
    #[case(vec!["--opt"], vec![None], vec![])]
    #[case(vec!["--opt", "--", "x"], vec![None], vec![])]
    fn optargumented(
        #[case] tokens: Vec<&str>,
        #[case] expected: Vec<Option<&str>>,
        #[case] flags: Vec<&str>,
    ) {
        let registry = registry();

        let (result, _) = run(&registry, &tokens, Syntax::Conventional);

        let expected: Vec<Option<String>> = expected
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect();
        assert_eq!(result.values("--opt"), Some(&expected[..]));
        for flag in flags {
            assert!(result.is_used(flag), "{flag} should be used");
        }
        assert!(result.success());
    }

    #[test]
    fn optargumented_declined_token_is_positional() {
        let mut registry = Registry::new();
        registry
            .register(OptArgumented::new(["--colour"]).stickless(|token| token == "always"))
            .unwrap();

        let (result, _) = run(
            &registry,
            &["--colour", "file", "--colour", "always"],
            Syntax::Conventional,
        );

        assert_eq!(
            result.values("--colour"),
            Some(&[None, Some("always".to_string())][..])
        );
        assert_eq!(result.files(), &["file"]);
    }

    #[test]
    fn variadic_absorbs_positionals() {
        let registry = registry();

        let (result, _) = run(&registry, &["a", "b", "--rest", "c", "d"], Syntax::Conventional);

        assert_eq!(result.values("-r"), Some(&some(&["a", "b", "c", "d"])[..]));
        assert!(result.files().is_empty());
        assert_eq!(result.message(), None);
    }

    #[rstest]
    #[case(vec!["a", "--rest=c", "d"], vec!["c", "a", "d"])]
    #[case(vec!["a", "-rc", "d"], vec!["c", "a", "d"])]
    #[case(vec!["-rc", "-a", "--sea"], vec!["c", "-a", "--sea"])]
    fn variadic_with_value(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        let registry = registry();

        let (result, _) = run(&registry, &tokens, Syntax::Conventional);

        assert_eq!(result.values("-r"), Some(&some(&expected)[..]));
        assert!(result.files().is_empty());
        assert!(!result.is_used("-a"));
    }

    #[test]
    fn variadic_without_anything() {
        let registry = registry();

        let (result, _) = run(&registry, &["-ar"], Syntax::Conventional);

        assert_eq!(result.values("-r"), Some(&[][..]));
        assert_eq!(result.count("-a"), 1);
    }

    #[test]
    fn variadic_unused_leaves_positionals() {
        let registry = registry();

        let (result, _) = run(&registry, &["a", "-b", "c"], Syntax::Conventional);

        assert!(!result.is_used("-r"));
        assert_eq!(result.files(), &["a", "c"]);
        assert_eq!(result.message(), Some("a c"));
    }

    #[test]
    fn variadic_first_used_absorbs() {
        let mut registry = Registry::new();
        registry.register(Variadic::new(["--first"])).unwrap();
        registry.register(Variadic::new(["--second"])).unwrap();

        let (result, _) = run(&registry, &["x", "--second", "y"], Syntax::Conventional);

        assert!(!result.is_used("--first"));
        assert_eq!(result.values("--second"), Some(&some(&["x", "y"])[..]));
    }

    #[test]
    fn abbreviation() {
        let mut registry = Registry::new();
        registry.register(Argumentless::new(["--verbose"])).unwrap();
        registry.register(Argumentless::new(["--version"])).unwrap();

        let (result, lines) = run(&registry, &["--verb", "--ver"], Syntax::Conventional);

        assert_eq!(result.count("--verbose"), 1);
        assert!(!result.is_used("--version"));
        assert_eq!(result.unrecognised_count(), 1);
        assert_eq!(lines, vec!["program: warning: unrecognised option --ver"]);
    }

    #[test]
    fn abbreviation_with_value() {
        let registry = registry();

        let (result, _) = run(&registry, &["--se=1", "--op=2", "--re=3", "x"], Syntax::Conventional);

        assert_eq!(result.values("-c"), Some(&some(&["1"])[..]));
        assert_eq!(result.values("--opt"), Some(&some(&["2"])[..]));
        assert_eq!(result.values("-r"), Some(&some(&["3", "x"])[..]));
    }

    #[rstest]
    #[case(vec!["--bee=1"], "--bee")]
    #[case(vec!["--be=1"], "--be")]
    fn abbreviation_argumentless_with_value(#[case] tokens: Vec<&str>, #[case] reported: &str) {
        let registry = registry();

        let (result, lines) = run(&registry, &tokens, Syntax::Conventional);

        assert!(!result.is_used("-b"));
        assert_eq!(result.unrecognised_count(), 1);
        assert_eq!(
            lines,
            vec![format!("program: warning: unrecognised option {reported}")]
        );
    }

    #[test]
    fn abbreviation_disabled() {
        let registry = registry();
        let transcript = Transcript::default();
        let engine = Engine::new("program", &registry, &NoAbbreviations, &transcript);

        let result = engine.run(&["--be"], Syntax::Conventional).unwrap();

        assert!(!result.is_used("-b"));
        assert_eq!(result.unrecognised_count(), 1);
    }

    #[test]
    fn abbreviation_unregistered_expansion() {
        let registry = registry();
        let transcript = Transcript::default();
        let nonsense = |_: &str, _: &[&str], _: &HashMap<&str, &str>| Some("--nonsense".to_string());
        let engine = Engine::new("program", &registry, &nonsense, &transcript);

        let result = engine.run(&["--be"], Syntax::Conventional).unwrap();

        assert_eq!(result.unrecognised_count(), 1);
    }

    #[test]
    fn unrecognised_cap() {
        let registry = registry();
        let tokens = ["--u1", "--u2", "--u3", "--u4", "--u5", "--u6", "--u7"];

        let (result, lines) = run(&registry, &tokens, Syntax::Conventional);

        assert_eq!(result.unrecognised_count(), 7);
        assert!(!result.success());
        assert_eq!(
            lines,
            vec![
                "program: warning: unrecognised option --u1",
                "program: warning: unrecognised option --u2",
                "program: warning: unrecognised option --u3",
                "program: warning: unrecognised option --u4",
                "program: warning: unrecognised option --u5",
                "program: warning: 2 more unrecognised options",
            ]
        );
    }

    #[test]
    fn unrecognised_cap_single() {
        let registry = registry();

        let (result, lines) = run(&registry, &["-xyzuvw"], Syntax::Conventional);

        assert_eq!(result.unrecognised_count(), 6);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5], "program: warning: 1 more unrecognised option");
    }

    #[rstest]
    #[case(vec!["-"], vec!["-"])]
    #[case(vec!["+"], vec!["+"])]
    #[case(vec!["x", "-", "y"], vec!["x", "-", "y"])]
    fn lone_sign_is_positional(#[case] tokens: Vec<&str>, #[case] expected: Vec<&str>) {
        let registry = registry();

        let (result, _) = run(&registry, &tokens, Syntax::Conventional);

        assert_eq!(result.files(), &expected[..]);
        assert!(result.success());
    }

    #[test]
    fn alternative_syntax() {
        let mut registry = Registry::new();
        registry.register(Argumentless::new(["-verbose", "-v"])).unwrap();
        registry.register(Argumented::new(["-output"])).unwrap();
        registry.register(Argumentless::new(["-x"])).unwrap();

        let (result, lines) = run(
            &registry,
            &["-verbose", "-output=a", "-output", "b", "-v", "-vx", "-outp", "c"],
            Syntax::Alternative,
        );

        assert_eq!(result.count("-verbose"), 2);
        assert_eq!(result.values("-output"), Some(&some(&["a", "b", "c"])[..]));
        assert!(!result.is_used("-x"));
        // "-vx" is one (unknown) option rather than a cluster.
        assert_eq!(result.unrecognised_count(), 1);
        assert_eq!(lines, vec!["program: warning: unrecognised option -vx"]);
    }

    #[test]
    fn conventional_single_dash_is_cluster() {
        let mut registry = Registry::new();
        registry.register(Argumentless::new(["-verbose"])).unwrap();
        registry.register(Argumentless::new(["-v"])).unwrap();

        let (result, _) = run(&registry, &["-verbose"], Syntax::Conventional);

        assert!(!result.is_used("-verbose"));
        assert_eq!(result.count("-v"), 1);
        // e, r, b, o, s, e
        assert_eq!(result.unrecognised_count(), 6);
    }

    #[test]
    fn triggers_in_encounter_order() {
        let mut events: Vec<String> = Vec::default();
        {
            let events = std::cell::RefCell::new(&mut events);
            let mut registry = Registry::new();
            registry
                .register(Argumentless::new(["-a"]).trigger(|used, _| {
                    events.borrow_mut().push(used.to_string());
                    Ok(())
                }))
                .unwrap();
            registry
                .register(Argumented::new(["-c", "--sea"]).trigger(|used, standard, value| {
                    events
                        .borrow_mut()
                        .push(format!("{used}({standard})={}", value.unwrap_or("-")));
                    Ok(())
                }))
                .unwrap();
            registry
                .register(Variadic::new(["--rest"]).trigger(|used, _| {
                    events.borrow_mut().push(used.to_string());
                    Ok(())
                }))
                .unwrap();

            run(
                &registry,
                &["-a", "--sea", "1", "-ac2", "-a", "--rest", "-a"],
                Syntax::Conventional,
            );
        }

        assert_eq!(
            events,
            vec!["-a", "--sea(-c)=1", "-a", "-c(-c)=2", "-a", "--rest"]
        );
    }

    #[test]
    fn trigger_error_stops_scan() {
        let mut registry = Registry::new();
        registry
            .register(Argumented::new(["--line"]).trigger(|_, _, value| match value {
                Some("bad") => Err(TriggerError("bad line".to_string())),
                _ => Ok(()),
            }))
            .unwrap();
        let transcript = Transcript::default();
        let engine = Engine::new("program", &registry, &NoAbbreviations, &transcript);

        let result = engine.run(&["--line", "1", "--line", "bad", "--nope"], Syntax::Conventional);

        assert_eq!(result, Err(TriggerError("bad line".to_string())));
        // The scan stopped before reaching '--nope'.
        assert!(transcript.lines().is_empty());
    }
}
