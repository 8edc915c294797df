//! Preview window selection.
//!
//! Picks at most `limit` neighbours of the current image so the listing can
//! show a strip of thumbnails around it.

/// A contiguous slice of the file list plus its 1-based inclusive bounds.
///
/// `last + 1 - first` always equals the number of items. Without files (or
/// with an index outside the list) the bounds are `(0, 0)`; a zero limit
/// yields an empty window positioned after the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewWindow<'a, T> {
    pub items: &'a [T],
    pub first: usize,
    pub last: usize,
}

impl<T> PreviewWindow<'_, T> {
    fn empty() -> Self {
        Self {
            items: &[],
            first: 0,
            last: 0,
        }
    }
}

/// Select up to `limit` items of `files` centered on `current_index`.
///
/// The window is shifted left when it would run past the end of the list.
/// With fewer files than `limit` it holds the whole list.
pub fn select_window<T>(
    limit: usize,
    files: &[T],
    current_index: usize,
) -> PreviewWindow<'_, T> {
    if files.is_empty() || current_index >= files.len() {
        return PreviewWindow::empty();
    }

    let mut left = current_index.saturating_sub(limit / 2);
    let mut right = left.saturating_add(limit);

    if right > files.len() {
        right = files.len();
        left = right.saturating_sub(limit);
    }

    PreviewWindow {
        items: &files[left..right],
        first: left + 1,
        last: right,
    }
}

/// Position of `selected` in `files`, if present.
pub fn find_current_index<S: AsRef<str>>(selected: &str, files: &[S]) -> Option<usize> {
    if selected.is_empty() {
        return None;
    }
    files.iter().position(|f| f.as_ref() == selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn many_files() -> Vec<String> {
        (1..=10).map(|i| format!("{i}.png")).collect()
    }

    #[test]
    fn window_from_start() {
        let files = many_files();
        let window = select_window(5, &files, 1);
        assert_eq!(window.items, &files[..5]);
        assert_eq!((window.first, window.last), (1, 5));
    }

    #[test]
    fn window_in_the_middle() {
        let files = many_files();
        let window = select_window(5, &files, 4);
        assert_eq!(window.items, &files[2..7]);
        assert_eq!((window.first, window.last), (3, 7));
    }

    #[test]
    fn window_shifted_back_from_end() {
        let files = many_files();
        let window = select_window(5, &files, 9);
        assert_eq!(window.items, &files[5..10]);
        assert_eq!((window.first, window.last), (6, 10));
    }

    #[test]
    fn empty_files_give_empty_window() {
        let files: Vec<String> = Vec::new();
        let window = select_window(5, &files, 0);
        assert!(window.items.is_empty());
        assert_eq!((window.first, window.last), (0, 0));
    }

    #[test]
    fn out_of_range_index_gives_empty_window() {
        let files = many_files();
        let window = select_window(5, &files, 10);
        assert!(window.items.is_empty());
        assert_eq!((window.first, window.last), (0, 0));
    }

    #[test]
    fn zero_limit_gives_empty_window_after_current() {
        let files = many_files();
        let window = select_window(0, &files, 4);
        assert!(window.items.is_empty());
        assert_eq!((window.first, window.last), (5, 4));
        assert_eq!(window.last + 1 - window.first, 0);
    }

    #[test]
    fn fewer_files_than_limit_returns_everything() {
        let files = vec!["a.png", "b.png", "c.png"];
        for current in 0..files.len() {
            let window = select_window(10, &files, current);
            assert_eq!(window.items, &files[..]);
            assert_eq!((window.first, window.last), (1, 3));
        }

        let files = many_files();
        let window = select_window(12, &files, 9);
        assert_eq!(window.items, &files[..]);
        assert_eq!((window.first, window.last), (1, 10));
    }

    #[test]
    fn window_length_and_bounds_agree_for_all_positions() {
        let files = many_files();
        for limit in 0..=12 {
            for current in 0..files.len() {
                let window = select_window(limit, &files, current);
                assert_eq!(window.items.len(), limit.min(files.len()));
                assert_eq!(window.last + 1 - window.first, window.items.len());
                assert_eq!(window.items, &files[window.first - 1..window.last]);
            }
        }
    }

    #[test]
    fn selection_is_repeatable() {
        let files = many_files();
        assert_eq!(select_window(4, &files, 6), select_window(4, &files, 6));
    }

    #[test]
    fn find_current_index_cases() {
        let files = vec!["1.png", "2.png"];
        assert_eq!(find_current_index("1.png", &files), Some(0));
        assert_eq!(find_current_index("2.png", &files), Some(1));
        assert_eq!(find_current_index("3.png", &files), None);
        assert_eq!(find_current_index("", &files), None);
        assert_eq!(find_current_index::<&str>("1.png", &[]), None);
    }
}
