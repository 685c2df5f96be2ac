use relative_path::{RelativePath, RelativePathBuf};

use crate::HostError;
use crate::files::DirectoryHost;

/// One directory still to be searched, with what remains of the query
/// once the directories above it are stripped off
struct Frame<'q> {
    dir: RelativePathBuf,
    prefix: &'q str,
    previous: Option<&'q str>,
    /// A directory is searched again without `previous` at most once
    may_retry: bool,
}

/// Prefix completion over a directory tree.
///
/// Given a partial path and the completion returned last time, yields the
/// next entry whose name starts with the prefix, in the host's listing
/// order. Directory segments at the front of the prefix (`src/lib/ma`) are
/// walked into. Directories are returned with a trailing `/`.
///
/// When `previous` is the last match, or is never seen at all, the search
/// starts over and the first match comes back, so repeated calls cycle.
/// If nothing matches the prefix itself is returned unchanged.
pub struct PathCompleter<'h, D: DirectoryHost + ?Sized> {
    host: &'h D,
}

impl<'h, D: DirectoryHost + ?Sized> PathCompleter<'h, D> {
    pub fn new(host: &'h D) -> Self {
        Self { host }
    }

    /// Next completion of `prefix` under `start`.
    ///
    /// Listing failures count as "no match": completion runs on every
    /// keypress and must never interrupt typing.
    pub fn next_match(&self, start: &RelativePath, prefix: &str, previous: Option<&str>) -> String {
        match self.search(start, prefix, previous) {
            Ok(Some(found)) => found,
            Ok(None) => prefix.to_string(),
            Err(e) => {
                log::warn!("Completion of {prefix:?} in {start:?} failed: {e}");
                prefix.to_string()
            }
        }
    }

    fn search(
        &self,
        start: &RelativePath,
        prefix: &str,
        previous: Option<&str>,
    ) -> Result<Option<String>, HostError> {
        let mut frames = vec![Frame {
            dir: start.to_relative_path_buf(),
            prefix,
            previous,
            may_retry: true,
        }];
        // Directory segments walked into so far, each ending in '/'
        let mut descended = String::new();

        while let Some(frame) = frames.pop() {
            let entries = self.host.members(&frame.dir)?;
            let mut found_previous = frame.previous.is_none();
            let mut descend = None;

            for entry in &entries {
                let name = entry.display_name();
                if entry.is_dir()
                    && let Some(rest) = frame.prefix.strip_prefix(name.as_str())
                {
                    let previous = frame
                        .previous
                        .map(|previous| previous.strip_prefix(name.as_str()).unwrap_or(previous));
                    descended.push_str(&name);
                    descend = Some(Frame {
                        dir: frame.dir.join(&entry.name),
                        prefix: rest,
                        previous,
                        may_retry: true,
                    });
                    break;
                } else if !found_previous {
                    found_previous = frame.previous == Some(name.as_str());
                } else if name.starts_with(frame.prefix) {
                    return Ok(Some(format!("{descended}{name}")));
                }
            }

            if let Some(next) = descend {
                log::debug!("Completion descends into {}", next.dir);
                frames.push(next);
            } else if frame.previous.is_some() && frame.may_retry {
                log::debug!(
                    "Completion restarts in {:?} (previous {:?} seen: {found_previous})",
                    frame.dir,
                    frame.previous
                );
                frames.push(Frame {
                    previous: None,
                    may_retry: false,
                    ..frame
                });
            }
        }
        Ok(None)
    }
}
