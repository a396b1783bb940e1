pub mod linkedin;
