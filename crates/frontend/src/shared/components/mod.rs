pub mod data_table;
pub mod page_header;
pub mod pagination_controls;
pub mod stat_card;
