pub mod thema;
