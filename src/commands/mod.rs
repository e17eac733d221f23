pub type CmdResult<T> = idswap::Result<(T, i32)>;

pub mod swap;
