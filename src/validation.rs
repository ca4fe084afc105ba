use url::Url;

use crate::errors::InputError;

const SUPPORTED_SCHEMES: &[&str] = &["http", "https", "git", "ssh", "file"];

/// Reject URLs git would misread or that we never want to hand to it.
///
/// Anything with `://` must parse and use a supported scheme. Remote-helper
/// syntax (`transport::address`) is refused outright. scp-like
/// `user@host:path` and plain paths are passed through to git unchanged.
pub fn validate_repo_url(url: &str) -> Result<(), InputError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(InputError::MissingUrl);
    }

    if url.starts_with('-') {
        return Err(InputError::LooksLikeOption {
            url: url.to_string(),
        });
    }

    if let Some((scheme, _)) = url.split_once("://") {
        let scheme = match Url::parse(url) {
            Ok(parsed) => parsed.scheme().to_string(),
            Err(_) => scheme.to_lowercase(),
        };

        if !SUPPORTED_SCHEMES.contains(&scheme.as_str()) {
            return Err(InputError::UnsupportedScheme {
                url: url.to_string(),
                scheme,
            });
        }
    } else if let Some((transport, _)) = url.split_once("::") {
        return Err(InputError::UnsupportedScheme {
            url: url.to_string(),
            scheme: transport.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_forms() {
        for url in [
            "https://github.com/org/repo.git",
            "http://gitlab.example.com/org/repo",
            "ssh://git@host/org/repo.git",
            "git://host/org/repo.git",
            "file:///tmp/repo.git",
            "git@github.com:org/repo.git",
            "/srv/git/repo.git",
        ] {
            assert!(validate_repo_url(url).is_ok(), "expected {url} to be accepted");
        }
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert!(validate_repo_url("HTTPS://github.com/org/repo.git").is_ok());
    }

    #[test]
    fn test_rejects_remote_helper_syntax() {
        match validate_repo_url("ext::sh -c touch% /tmp/pwned") {
            Err(InputError::UnsupportedScheme { scheme, .. }) => assert_eq!(scheme, "ext"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_ftp() {
        match validate_repo_url("ftp://host/org/repo.git") {
            Err(InputError::UnsupportedScheme { scheme, .. }) => assert_eq!(scheme, "ftp"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_option_lookalike() {
        assert!(matches!(
            validate_repo_url("--upload-pack=touch /tmp/x"),
            Err(InputError::LooksLikeOption { .. })
        ));
    }

    #[test]
    fn test_blank_is_missing() {
        assert!(matches!(validate_repo_url(" "), Err(InputError::MissingUrl)));
    }
}
