#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["hush"]).unwrap();
        assert_eq!(cli.project, None);
        assert_eq!(cli.compiler, None);
        assert!(!cli.watch);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.unknown.is_empty());
        assert_eq!(cli.unknown_warning(), None);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["hush", "-p", "app/tsconfig.json", "-c", "oxc", "-w"])
            .unwrap();
        assert_eq!(cli.project, Some(PathBuf::from("app/tsconfig.json")));
        assert_eq!(cli.compiler.as_deref(), Some("oxc"));
        assert!(cli.watch);
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "hush",
            "--project",
            "tsconfig.build.json",
            "--compiler",
            "tsc",
            "--watch",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(cli.project, Some(PathBuf::from("tsconfig.build.json")));
        assert_eq!(cli.compiler.as_deref(), Some("tsc"));
        assert!(cli.watch);
        assert!(cli.no_color);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["hush", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_stray_arguments_become_warning() {
        let cli = Cli::try_parse_from(["hush", "src", "extra"]).unwrap();
        assert_eq!(cli.unknown, vec!["src".to_string(), "extra".to_string()]);
        assert_eq!(
            cli.unknown_warning().as_deref(),
            Some("Unknown CLI options received: src, extra")
        );
    }
}
