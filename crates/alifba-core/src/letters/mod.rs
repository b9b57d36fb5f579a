// letters/mod.rs
//
// The fixed alphabet table and everything derived from it:
// lookups, neighbors, door counts, example image paths, name collation.

pub mod assets;
pub mod collation;
pub mod table;

pub use assets::{example_image_path, preload_paths};
pub use collation::compare_names;
pub use table::{
    LetterEntry, LETTERS, MAX_DOORS, DEFAULT_GLYPH,
    find, find_or_default, resolve, index_of, is_valid, next, previous,
    default_letter, validate_door_count, clamp_door_count, total_examples, number_words,
};
