pub mod error_banner;
pub mod lookup_select;
pub mod page_header;
pub mod pagination_controls;
pub mod status_badge;
