// Built-in language table for the CFG sample projects

use crate::executable::HostOs;
use crate::matcher::{MatchCheck, MatchRule};

use super::descriptor::LanguageDescriptor;

/// Ruby and Python samples append the library version: `Hello, world! (x.y.z)`
const VERSIONED_GREETING: &str = "Hello, world! (";

pub fn builtin_descriptors() -> Vec<LanguageDescriptor> {
    let versioned = || MatchRule::StartsWithLastLine(VERSIONED_GREETING.to_string());

    vec![
        LanguageDescriptor::new("dlang", "D").with_command("dub run"),
        LanguageDescriptor::new("dotnet", "C#").with_command("dotnet run"),
        LanguageDescriptor::new("go", "Go")
            .with_command("go mod download github.com/vsajip/go-cfg-lib/config")
            .with_command("go run main.go"),
        LanguageDescriptor::new("js", "JavaScript/Node")
            .with_command("npm i cfg-lib")
            .with_command("node app.js"),
        LanguageDescriptor::new("jvm", "JVM")
            .with_command("gradle run")
            .with_rule(jvm_rule(HostOs::current()))
            .with_run_last(true),
        LanguageDescriptor::new("python", "Python")
            .with_command("python3 app.py")
            .with_rule(versioned()),
        LanguageDescriptor::new("ruby", "Ruby")
            .with_command("bundle install")
            .with_command("ruby cfgclient.rb")
            .with_rule(versioned()),
        LanguageDescriptor::new("rust", "Rust").with_command("cargo run"),
        LanguageDescriptor::new("elixir", "Elixir")
            .with_command("mix deps.get")
            .with_command("mix run main.exs"),
        LanguageDescriptor::new("nim", "Nim")
            .with_command("nimble install -y --depsOnly")
            .with_command("nim r main.nim"),
        LanguageDescriptor::new("dart", "Dart")
            .with_command("dart pub get")
            .with_command("dart run"),
    ]
}

/// Gradle prints task banners after the program output, so the JVM sample is
/// checked for its two greetings directly under the `run` task banner.
fn jvm_rule(os: HostOs) -> MatchRule {
    let nl = os.newline();
    MatchRule::SubstringAnywhere(vec![MatchCheck::contains(format!(
        "> Task :run{nl}Hello, world!{nl}Hello, world!{nl}"
    ))])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_a_run_command() {
        for language in builtin_descriptors() {
            assert!(
                language.run_command().is_some(),
                "{} has no run command",
                language.id
            );
        }
    }

    #[test]
    fn test_only_jvm_runs_last() {
        let last: Vec<String> = builtin_descriptors()
            .into_iter()
            .filter(|l| l.run_last)
            .map(|l| l.id)
            .collect();
        assert_eq!(last, vec!["jvm"]);
    }

    #[test]
    fn test_jvm_rule_uses_host_newlines() {
        let posix = jvm_rule(HostOs::Posix);
        let output = concat!(
            "Starting Gradle\n",
            "> Task :run\nHello, world!\nHello, world!\n",
            "\nBUILD SUCCESSFUL\n",
        );
        assert!(posix.matches(output));
        assert!(!posix.matches("> Task :run\r\nHello, world!\r\nHello, world!\r\n"));

        let windows = jvm_rule(HostOs::Windows);
        assert!(windows.matches("> Task :run\r\nHello, world!\r\nHello, world!\r\n"));
    }

    #[test]
    fn test_versioned_languages() {
        for language in builtin_descriptors() {
            if language.id == "python" || language.id == "ruby" {
                assert!(language.match_rule().matches("Hello, world! (0.1.2)\n"));
            }
        }
    }
}
