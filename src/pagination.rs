use serde::{Deserialize, Serialize};

/// Items shown per paginated view.
pub const PAGE_SIZE: usize = 10;

/// One page of an ordered collection plus navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub items: Vec<T>,
}

/// Slice `items` into the requested 1-based page. Out-of-range numbers
/// clamp to the nearest valid page; an empty collection yields one empty
/// page.
pub fn paginate<T>(items: Vec<T>, requested: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_items.div_ceil(PAGE_SIZE).max(1);
    let number = requested.clamp(1, total_pages);
    let start = (number - 1) * PAGE_SIZE;
    let items: Vec<T> = items.into_iter().skip(start).take(PAGE_SIZE).collect();
    Page {
        number,
        total_pages,
        total_items,
        has_next: number < total_pages,
        has_previous: number > 1,
        items,
    }
}

/// `?page=` query surface. Kept as a raw string so junk values fall back
/// to page 1 instead of a 400.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn number(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_is_one_empty_page() {
        let page = paginate(Vec::<i32>::new(), 1);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn thirteen_items_split_ten_three() {
        let items: Vec<i32> = (0..13).collect();
        let first = paginate(items.clone(), 1);
        assert_eq!(first.items.len(), 10);
        assert!(first.has_next);
        assert!(!first.has_previous);
        let second = paginate(items, 2);
        assert_eq!(second.items.len(), 3);
        assert_eq!(second.total_pages, 2);
        assert!(!second.has_next);
        assert!(second.has_previous);
    }

    #[test]
    fn exact_multiple_fills_last_page() {
        let page = paginate((0..20).collect::<Vec<i32>>(), 2);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next);
    }

    #[test]
    fn out_of_range_clamps() {
        let items: Vec<i32> = (0..13).collect();
        assert_eq!(paginate(items.clone(), 0).number, 1);
        assert_eq!(paginate(items.clone(), 99).number, 2);
        assert_eq!(paginate(items, 99).items.len(), 3);
    }

    #[test]
    fn junk_page_param_defaults_to_one() {
        let q = PageQuery { page: Some("banana".into()) };
        assert_eq!(q.number(), 1);
        let q = PageQuery { page: Some("-3".into()) };
        assert_eq!(q.number(), 1);
        let q = PageQuery { page: Some("2".into()) };
        assert_eq!(q.number(), 2);
        let q = PageQuery { page: None };
        assert_eq!(q.number(), 1);
    }
}
