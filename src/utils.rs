use percent_encoding::percent_decode_str;
use url::Url;

use crate::errors::InputError;

const VCS_SUFFIX: &str = ".git";

/// Directory name a repository is cloned into: the last path segment of the
/// URL with one trailing `.git` removed.
///
/// `https://host/org/repo.git` and `git@host:org/repo.git` both map to `repo`.
pub fn repo_dir_name(url: &str) -> Result<String, InputError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(InputError::MissingUrl);
    }

    let unnamed = || InputError::UnnamedRepository {
        url: url.to_string(),
    };

    // Only the path of a real URL counts; query and fragment are dropped.
    let segment = if url.contains("://") {
        match Url::parse(url) {
            Ok(parsed) => decoded_last_segment(&parsed).ok_or_else(unnamed)?,
            Err(_) => last_segment(url).to_string(),
        }
    } else {
        last_segment(url).to_string()
    };

    let name = segment.strip_suffix(VCS_SUFFIX).unwrap_or(&segment);

    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(unnamed());
    }

    Ok(name.to_string())
}

fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default()
}

/// Last non-empty path segment of a parsed URL, percent-decoded. `None` when
/// the bytes aren't valid UTF-8.
fn decoded_last_segment(parsed: &Url) -> Option<String> {
    let raw = match parsed.path_segments() {
        Some(mut segments) => segments.rfind(|segment| !segment.is_empty()).unwrap_or_default(),
        None => last_segment(parsed.path()),
    };

    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}
