//! PDF viewer state.  Pages are simulated against a fixed count; nothing
//! is parsed or rendered.

/// Page count every document reports until real parsing exists.
pub const PLACEHOLDER_PAGE_COUNT: u32 = 10;
pub const ZOOM_MIN: u32 = 50;
pub const ZOOM_MAX: u32 = 200;
pub const ZOOM_STEP: u32 = 25;
pub const ZOOM_DEFAULT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfViewer {
    page: u32,
    total_pages: u32,
    zoom: u32,
}

impl Default for PdfViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfViewer {
    pub fn new() -> Self {
        Self {
            page: 1,
            total_pages: PLACEHOLDER_PAGE_COUNT,
            zoom: ZOOM_DEFAULT,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.total_pages);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    pub fn page_label(&self) -> String {
        format!("עמוד {} מתוך {}", self.page, self.total_pages)
    }
}
