// Discord glue for game tracking: presence updates in, announcements out.

pub mod announcements;
pub mod formatting;
pub mod presence_handler;
