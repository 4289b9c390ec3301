//! Page-boundary arithmetic for a fixed number of labels per page.

/// Number of pages needed for `total` labels.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Whether a page ends after drawing label `index` out of `total`.
///
/// True for the last slot of every page and for the final label, so a
/// trailing partial page is flushed too.
pub fn ends_page(index: usize, total: usize, per_page: usize) -> bool {
    if per_page == 0 || index >= total {
        return false;
    }
    index % per_page == per_page - 1 || index + 1 == total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 8), 0);
        assert_eq!(page_count(1, 8), 1);
        assert_eq!(page_count(8, 8), 1);
        assert_eq!(page_count(9, 8), 2);
        assert_eq!(page_count(24, 12), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn test_page_breaks_match_page_count() {
        for per_page in [1, 8, 12] {
            for total in 0..40 {
                let breaks = (0..total)
                    .filter(|&i| ends_page(i, total, per_page))
                    .count();
                assert_eq!(
                    breaks,
                    page_count(total, per_page),
                    "total={total} per_page={per_page}"
                );
            }
        }
    }

    #[test]
    fn test_trailing_partial_page_is_flushed() {
        assert!(ends_page(7, 20, 8));
        assert!(ends_page(15, 20, 8));
        assert!(ends_page(19, 20, 8));
        assert!(!ends_page(18, 20, 8));
        assert!(!ends_page(20, 20, 8));
    }
}
