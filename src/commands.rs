//! Command-line parsing and plain-text rendering of results
//!
//! Parses `tunesearch [search [--json] <term...> | help]`.

use crate::backend::ResultRecord;

/// Parsed command from the argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the search window (no arguments)
    Window,
    /// One search printed to stdout: search [--json] <term...>
    Search { term: String, json: bool },
    /// Show help: help
    Help,
    /// Anything else
    Unknown(String),
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse(args: &[String]) -> Self {
        let Some(first) = args.first() else {
            return Command::Window;
        };

        match first.to_lowercase().as_str() {
            "search" | "s" => {
                let mut json = false;
                let mut words = Vec::new();
                let mut flags_done = false;

                for arg in &args[1..] {
                    match arg.as_str() {
                        "--json" if !flags_done => json = true,
                        "--" if !flags_done => flags_done = true,
                        _ => words.push(arg.as_str()),
                    }
                }

                Command::Search {
                    term: words.join(" "),
                    json,
                }
            }
            "window" | "open" => Command::Window,
            "help" | "--help" | "-h" => Command::Help,
            _ => Command::Unknown(first.clone()),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"TuneSearch - search the iTunes catalog

Usage: tunesearch [command]

Commands:
  (none), open                  Open the search window
  search [--json] <term...>     Search once and print the results
  help                          Show this help message

Environment:
  TUNESEARCH_ENDPOINT   Search endpoint (default https://itunes.apple.com/search)
  TUNESEARCH_MEDIA      Media kind to search (default all)
  RUST_LOG              Log filter, e.g. RUST_LOG=tunesearch=debug"#
    }
}

/// Render records one per line, with the preview link indented below
pub fn render_plain(records: &[ResultRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {} - {} [{}]\n",
            i + 1,
            record.title,
            record.artist,
            record.media_kind
        ));
        if let Some(preview) = &record.preview {
            out.push_str(&format!("     {}\n", preview));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::decode::decode_results;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_window() {
        assert_eq!(Command::parse(&[]), Command::Window);
        assert_eq!(Command::parse(&args(&["open"])), Command::Window);
    }

    #[test]
    fn test_parse_search() {
        match Command::parse(&args(&["search", "jack", "johnson"])) {
            Command::Search { term, json } => {
                assert_eq!(term, "jack johnson");
                assert!(!json);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_parse_search_json() {
        assert_eq!(
            Command::parse(&args(&["search", "--json", "queen"])),
            Command::Search {
                term: "queen".into(),
                json: true
            }
        );
        // Flags stop after `--`
        assert_eq!(
            Command::parse(&args(&["search", "--", "--json"])),
            Command::Search {
                term: "--json".into(),
                json: false
            }
        );
    }

    #[test]
    fn test_parse_empty_search() {
        assert_eq!(
            Command::parse(&args(&["search"])),
            Command::Search {
                term: String::new(),
                json: false
            }
        );
    }

    #[test]
    fn test_parse_unknown() {
        match Command::parse(&args(&["frobnicate"])) {
            Command::Unknown(cmd) => assert_eq!(cmd, "frobnicate"),
            _ => panic!("Expected Unknown"),
        }
    }

    #[test]
    fn test_render_plain() {
        let records = decode_results(
            br#"{"results":[
                {"trackName":"Upside Down","artistName":"Jack Johnson","kind":"song","previewUrl":"https://x/p.m4a"},
                {}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            render_plain(&records),
            "  1. Upside Down - Jack Johnson [song]\n     https://x/p.m4a\n  2. Unknown Title - Unknown Artist [Unknown Media]\n"
        );
    }
}
