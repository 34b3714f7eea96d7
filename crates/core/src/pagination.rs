//! Pagination arithmetic for the Tumblr posts endpoint
//!
//! The posts endpoint is walked with a fixed page size. The number of pages is
//! derived from the total post count reported by the info endpoint, so every
//! offset is known before the first page is requested.

/// Number of posts requested per page
pub const PAGE_SIZE: usize = 20;

/// Number of page requests needed to fetch `post_count` posts
///
/// Equivalent to `ceil(post_count / PAGE_SIZE)`; zero posts means zero pages.
pub fn page_count(post_count: usize) -> usize {
    post_count.div_ceil(PAGE_SIZE)
}

/// Offsets of every page request, in ascending order
pub fn page_offsets(post_count: usize) -> Vec<usize> {
    (0..page_count(post_count))
        .map(|page| page * PAGE_SIZE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_zero_posts() {
        assert_eq!(page_count(0), 0);
    }

    #[test]
    fn test_page_count_exact_multiple() {
        assert_eq!(page_count(20), 1);
        assert_eq!(page_count(40), 2);
    }

    #[test]
    fn test_page_count_remainder_adds_page() {
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(21), 2);
        assert_eq!(page_count(39), 2);
    }

    #[test]
    fn test_page_count_matches_ceil_for_range() {
        for count in 0..200 {
            let expected = (count as f64 / PAGE_SIZE as f64).ceil() as usize;
            assert_eq!(page_count(count), expected, "post_count = {count}");
        }
    }

    #[test]
    fn test_page_offsets_empty() {
        assert!(page_offsets(0).is_empty());
    }

    #[test]
    fn test_page_offsets_ascending() {
        assert_eq!(page_offsets(41), vec![0, 20, 40]);
    }

    #[test]
    fn test_page_offsets_len_matches_count() {
        assert_eq!(page_offsets(60).len(), page_count(60));
    }
}
