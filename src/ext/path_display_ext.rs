use std::path::{Component, Path, PathBuf};

/// Renders a path for log and error messages.
///
/// Canonicalizes when the path exists; otherwise falls back to an
/// absolute form with `.` and `..` components resolved textually, so
/// messages about missing files still show a full path.
pub trait PathDisplayExt {
    fn friendly_display(&self) -> String;
}

impl<P: AsRef<Path>> PathDisplayExt for P {
    fn friendly_display(&self) -> String {
        let path = self.as_ref();
        if let Ok(canonical) = path.canonicalize() {
            return canonical.display().to_string();
        }

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        };
        normalize(&absolute).display().to_string()
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .fold(Vec::new(), |mut parts, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !matches!(parts.last(), Some(Component::RootDir) | None) {
                        parts.pop();
                    }
                }
                other => parts.push(other),
            }
            parts
        })
        .iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_relative_path_becomes_absolute() {
        let display = Path::new("no/such/file.yaml").friendly_display();
        assert!(Path::new(&display).is_absolute());
        assert!(display.ends_with("no/such/file.yaml"));
    }

    #[test]
    fn dot_components_are_resolved() {
        let display = Path::new("/a/b/./../c").friendly_display();
        assert_eq!(display, "/a/c");
    }

    #[test]
    fn parent_of_root_stays_at_root() {
        let display = Path::new("/../x").friendly_display();
        assert_eq!(display, "/x");
    }
}
