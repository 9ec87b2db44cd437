use std::collections::{HashMap, HashSet};

use super::value::is_truthy;
use super::{ArgValue, ParsedArgs};

/// Parser configuration: alias expansion, boolean flag coercion, and the
/// stop-at-positional switch.
///
/// # Example
///
/// ```ignore
/// let config = ParserConfig::new()
///     .flag("quiet")
///     .alias("-q", "--quiet")
///     .stop_at_positional();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    aliases: HashMap<String, String>,
    flags: HashSet<String>,
    stop_at_positional: bool,
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a short token (`-q`) that expands to a canonical long
    /// token (`--quiet`) before classification.
    pub fn alias(mut self, short: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(short.into(), target.into());
        self
    }

    /// Mark an option name (without its `--` marker) as boolean: raw
    /// values go through the truthiness rule instead of staying text, and
    /// the option never consumes a following token.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.flags.insert(name.into());
        self
    }

    /// Once one positional has been collected, sweep every remaining token
    /// into `positional` verbatim.
    pub fn stop_at_positional(mut self) -> Self {
        self.stop_at_positional = true;
        self
    }

    fn is_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    fn alias_target(&self, head: &str) -> Option<&str> {
        self.aliases.get(head).map(String::as_str)
    }
}

/// Classify `tokens` into positionals and options.
///
/// Per token, in order: the stop-at-positional sweep, the `--` terminator
/// sweep, alias expansion, the positional fallthrough, then `=`-aware
/// option handling with a one-token lookahead for separated values. No
/// token is ever dropped; every one lands in `positional`, an option
/// name, or an option value.
pub fn parse<I, S>(tokens: I, config: &ParserConfig) -> ParsedArgs
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
    let mut result = ParsedArgs::new();

    let mut index = 0;
    while index < tokens.len() {
        if config.stop_at_positional && !result.positional.is_empty() {
            result.positional.extend(tokens[index..].iter().cloned());
            break;
        }

        let raw = tokens[index].as_str();
        if raw == "--" {
            result.positional.extend(tokens[index + 1..].iter().cloned());
            break;
        }

        let token = expand_alias(raw, config);
        if !token.starts_with("--") {
            result.positional.push_back(token);
            index += 1;
            continue;
        }

        let (name, inline) = split_option(&token);
        let had_equals = inline.is_some();
        match inline.filter(|rest| !rest.is_empty()) {
            Some(rest) => {
                let value = if config.is_flag(&name) {
                    ArgValue::Flag(is_truthy(&rest))
                } else {
                    ArgValue::Text(rest)
                };
                result.options.insert(name, value);
            }
            None => {
                // A trailing `=` is an explicit "no value"; a bare name
                // defaults on. The lookahead only captures a token that is
                // not itself option-shaped.
                match tokens.get(index + 1) {
                    Some(next) if !next.starts_with('-') && !config.is_flag(&name) => {
                        result.options.insert(name, ArgValue::Text(next.clone()));
                        index += 1;
                    }
                    _ => {
                        result.options.insert(name, ArgValue::Flag(!had_equals));
                    }
                }
            }
        }
        index += 1;
    }

    result
}

/// Rewrite a registered alias into its long form. A joined value carries
/// over; a bare alias (or an empty joined value) substitutes a literal
/// `0`, so aliased switches default off.
fn expand_alias(raw: &str, config: &ParserConfig) -> String {
    if !raw.starts_with('-') {
        return raw.to_string();
    }
    let head = raw.split_once('=').map_or(raw, |(head, _)| head);
    let Some(target) = config.alias_target(head) else {
        return raw.to_string();
    };
    match raw.split_once('=') {
        Some((_, value)) if !value.is_empty() => format!("{target}={value}"),
        _ => format!("{target}=0"),
    }
}

/// Split a `--name[=value]` token into its name and the inline value.
fn split_option(token: &str) -> (String, Option<String>) {
    match token.split_once('=') {
        Some((key, rest)) => (key[2..].to_string(), Some(rest.to_string())),
        None => (token[2..].to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn standard() -> ParserConfig {
        ParserConfig::new()
            .flag("run")
            .flag("quiet")
            .flag("list")
            .alias("-r", "--run")
            .alias("-l", "--list")
            .alias("-q", "--quiet")
    }

    fn positional(args: &ParsedArgs) -> Vec<&str> {
        args.positional.iter().map(String::as_str).collect()
    }

    #[test]
    fn empty_input_yields_an_empty_result() {
        let args = parse(Vec::<String>::new(), &ParserConfig::new());
        assert_eq!(args, ParsedArgs::new());
    }

    #[test]
    fn bare_option_with_no_next_token_reads_true() {
        let args = parse(["build", "--verbose"], &ParserConfig::new());
        assert_eq!(positional(&args), ["build"]);
        assert_eq!(args.option("verbose"), Some(&ArgValue::Flag(true)));
    }

    #[test]
    fn inline_value_is_captured_as_text() {
        let args = parse(["--mode=fast"], &ParserConfig::new());
        assert_eq!(args.option("mode"), Some(&ArgValue::Text("fast".into())));
    }

    #[test]
    fn bare_alias_defaults_the_switch_off() {
        let args = parse(["-q"], &standard());
        assert_eq!(args.option("quiet"), Some(&ArgValue::Flag(false)));
    }

    #[test]
    fn unaliased_long_form_defaults_on() {
        let args = parse(["--quiet"], &standard());
        assert_eq!(args.option("quiet"), Some(&ArgValue::Flag(true)));
    }

    #[rstest]
    #[case::truthy_value("-q=yes", true)]
    #[case::zero_value("-q=0", false)]
    #[case::empty_value("-q=", false)]
    fn alias_with_a_joined_value_matches_the_long_form(
        #[case] short: &str,
        #[case] expected: bool,
    ) {
        let long = short.replacen("-q", "--quiet", 1);
        let from_short = parse([short], &standard());
        let from_long = parse([long.as_str()], &standard());
        assert_eq!(from_short.option("quiet"), Some(&ArgValue::Flag(expected)));
        assert_eq!(from_short, from_long);
    }

    #[test]
    fn terminator_sweeps_the_rest_verbatim() {
        let args = parse(["run", "--", "--not-a-flag"], &ParserConfig::new());
        assert_eq!(positional(&args), ["run", "--not-a-flag"]);
        assert!(args.options.is_empty());
    }

    #[test]
    fn only_the_first_terminator_is_consumed() {
        let args = parse(["--", "a", "--", "-b"], &ParserConfig::new());
        assert_eq!(positional(&args), ["a", "--", "-b"]);
    }

    #[rstest]
    #[case::one("--verbose=1", true)]
    #[case::zero("--verbose=0", false)]
    #[case::word_false_is_nonempty("--verbose=false", true)]
    #[case::empty("--verbose=", false)]
    fn flag_values_go_through_the_truthiness_rule(#[case] token: &str, #[case] expected: bool) {
        let config = ParserConfig::new().flag("verbose");
        let args = parse([token], &config);
        assert_eq!(args.option("verbose"), Some(&ArgValue::Flag(expected)));
    }

    #[test]
    fn separated_value_is_consumed() {
        let args = parse(["--mode", "fast", "build"], &ParserConfig::new());
        assert_eq!(args.option("mode"), Some(&ArgValue::Text("fast".into())));
        assert_eq!(positional(&args), ["build"]);
    }

    #[test]
    fn dash_lookahead_is_left_alone() {
        let args = parse(["--mode", "-x"], &ParserConfig::new());
        assert_eq!(args.option("mode"), Some(&ArgValue::Flag(true)));
        assert_eq!(positional(&args), ["-x"]);
    }

    #[test]
    fn flags_never_consume_a_value() {
        let args = parse(["--quiet", "build"], &standard());
        assert_eq!(args.option("quiet"), Some(&ArgValue::Flag(true)));
        assert_eq!(positional(&args), ["build"]);
    }

    #[test]
    fn trailing_equals_with_no_next_token_reads_false() {
        let args = parse(["--mode="], &ParserConfig::new());
        assert_eq!(args.option("mode"), Some(&ArgValue::Flag(false)));
    }

    #[test]
    fn empty_string_is_a_real_value() {
        let args = parse(["--mode", "", "tail"], &ParserConfig::new());
        assert_eq!(args.option("mode"), Some(&ArgValue::Text("".into())));
        assert_eq!(positional(&args), ["tail"]);
    }

    #[test]
    fn empty_string_after_a_flag_stays_positional() {
        let args = parse(["--quiet", ""], &standard());
        assert_eq!(args.option("quiet"), Some(&ArgValue::Flag(true)));
        assert_eq!(positional(&args), [""]);
    }

    #[test]
    fn stop_at_positional_sweeps_everything_after_the_first() {
        let config = ParserConfig::new().stop_at_positional();
        let args = parse(["--before=1", "x", "--after"], &config);
        assert_eq!(args.option("before"), Some(&ArgValue::Text("1".into())));
        assert_eq!(args.option("after"), None);
        assert_eq!(positional(&args), ["x", "--after"]);
    }

    #[test]
    fn repeated_option_keeps_the_last_value() {
        let args = parse(["--m=1", "--m=2"], &ParserConfig::new());
        assert_eq!(args.option("m"), Some(&ArgValue::Text("2".into())));
    }

    #[test]
    fn unaliased_single_dash_token_is_positional() {
        let args = parse(["-v"], &ParserConfig::new());
        assert_eq!(positional(&args), ["-v"]);
        assert!(args.options.is_empty());
    }

    #[test]
    fn bare_alias_to_a_non_flag_keeps_the_literal_zero() {
        let config = ParserConfig::new().alias("-o", "--out");
        let args = parse(["-o"], &config);
        assert_eq!(args.option("out"), Some(&ArgValue::Text("0".into())));
    }

    #[test]
    fn realistic_invocation_combines_the_rules() {
        let tokens = ["deploy", "--env", "prod", "-q", "--", "--raw"];
        let args = parse(tokens, &standard());
        assert_eq!(args.option("env"), Some(&ArgValue::Text("prod".into())));
        assert_eq!(args.option("quiet"), Some(&ArgValue::Flag(false)));
        assert_eq!(positional(&args), ["deploy", "--raw"]);
    }
}
