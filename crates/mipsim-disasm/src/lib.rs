pub mod listing;
pub mod model;

// Re-export commonly used types/functions for the binaries
pub use listing::{build_listing, render_text, ListingEntry, OutputFormat};
pub use model::{bin_path_for, load_word_file, write_output};
