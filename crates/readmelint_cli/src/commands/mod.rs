mod init;
mod lint;

pub use init::run_init;
pub use lint::run_lint;
