use std::path::PathBuf;

use clap::Parser;

use crate::models::ExistingPolicy;

/// Shallow, single-branch clone of one repository.
#[derive(Parser, Debug)]
#[command(
    name = "shallow-clone",
    version,
    about = "Shallow, single-branch git clone into <ROOT>/<repo-name>.",
    long_about = None
)]
pub struct Cli {
    /// Repository URL (https://, ssh://, git://, file:// or git@host:path)
    pub url: Option<String>,

    /// Directory clones are written under [default: models]
    pub root: Option<PathBuf>,

    /// Number of commits of history to fetch [default: 1]
    #[arg(long)]
    pub depth: Option<u32>,

    /// What to do when the target directory already has content [default: fail]
    #[arg(long, value_enum)]
    pub on_existing: Option<ExistingPolicy>,

    /// git executable to run [default: git]
    #[arg(long, value_name = "PATH")]
    pub git: Option<PathBuf>,

    /// Config file [default: ./clone.toml when present]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// The URL argument, treating an empty or blank value as absent.
    pub fn source_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_and_root() {
        let cli = Cli::try_parse_from(["shallow-clone", "https://host/org/repo.git", "out"]).unwrap();

        assert_eq!(cli.source_url(), Some("https://host/org/repo.git"));
        assert_eq!(cli.root, Some(PathBuf::from("out")));
        assert!(!cli.json);
    }

    #[test]
    fn test_missing_url_is_none() {
        let cli = Cli::try_parse_from(["shallow-clone"]).unwrap();
        assert_eq!(cli.source_url(), None);

        let cli = Cli::try_parse_from(["shallow-clone", "  "]).unwrap();
        assert_eq!(cli.source_url(), None);
    }

    #[test]
    fn test_on_existing_values() {
        for (raw, expected) in [
            ("fail", ExistingPolicy::Fail),
            ("overwrite", ExistingPolicy::Overwrite),
            ("skip", ExistingPolicy::Skip),
        ] {
            let cli = Cli::try_parse_from(["shallow-clone", "u", "--on-existing", raw]).unwrap();
            assert_eq!(cli.on_existing, Some(expected));
        }

        assert!(Cli::try_parse_from(["shallow-clone", "u", "--on-existing", "merge"]).is_err());
    }
}
