pub mod category_rows;
pub mod header;
pub mod help_overlay;
pub mod hero;
pub mod media_card;
pub mod modal;
pub mod player_view;
pub mod playlist_overlay;
pub mod search_results;
