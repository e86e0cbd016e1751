use thiserror::Error;

/// Runtime failures (spec §7e: "division/modulo by zero, instruction-pointer
/// out of bounds, stack overflow/underflow, host I/O failure").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    #[error("division by zero at ip={ip}")]
    DivisionByZero { ip: i32 },

    #[error("modulo by zero at ip={ip}")]
    ModuloByZero { ip: i32 },

    #[error("instruction pointer {ip} out of bounds")]
    IpOutOfBounds { ip: i32 },

    #[error("memory cell at {addr} holds {raw}, which is not a valid opcode")]
    InvalidOpcode { addr: i32, raw: i32 },

    #[error("memory access out of bounds at address {addr}")]
    OutOfBounds { addr: i32 },

    #[error("stack overflow: SP would exceed the memory buffer")]
    StackOverflow,

    #[error("stack underflow: SP fell below the current frame's base")]
    StackUnderflow,

    #[error("host I/O failure: {0}")]
    HostIo(String),
}
