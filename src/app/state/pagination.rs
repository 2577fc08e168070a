pub const FIRST_PAGE: u32 = 1;

// An append-only list of items fetched page by page
#[derive(Clone, Debug, PartialEq)]
pub struct PagedList<T>
where
    T: Clone,
{
    pub items: Vec<T>,
    pub next_page: u32,
    pub total_pages: Option<u32>,
}

impl<T> Default for PagedList<T>
where
    T: Clone,
{
    fn default() -> Self {
        Self {
            items: vec![],
            next_page: FIRST_PAGE,
            total_pages: None,
        }
    }
}

impl<T> PagedList<T>
where
    T: Clone,
{
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // Appends a loaded page, returns the index of the first appended item
    pub fn append_page(&mut self, page: u32, mut items: Vec<T>, total_pages: Option<u32>) -> usize {
        let append_index = self.items.len();
        self.items.append(&mut items);
        self.next_page = page.saturating_add(1);
        if total_pages.is_some() {
            self.total_pages = total_pages;
        }
        append_index
    }

    pub fn has_more(&self) -> bool {
        match self.total_pages {
            Some(total) => self.next_page <= total,
            None => true,
        }
    }
}
