use serde::{Deserialize, Serialize};

/// One page of a listing plus what a client needs to request the next.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedData<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> PaginatedData<T> {
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total_items: u64) -> Self {
        Self {
            items,
            page,
            per_page,
            total_pages: total_items.div_ceil(per_page.max(1)),
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PaginatedData;

    #[test]
    fn partial_last_page_is_counted() {
        let page = PaginatedData::new(vec![1, 2], 3, 5, 12);
        assert_eq!(page.total_pages, 3);
        assert!(PaginatedData::<u8>::new(Vec::new(), 1, 15, 0).total_pages == 0);
    }
}
