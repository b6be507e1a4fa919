mod error;
mod format;
mod io;
mod printer;
