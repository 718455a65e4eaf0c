use num_enum::IntoPrimitive;

use crate::parser::ast::BinaryOp;

/// The module preamble: the `\0asm` magic number followed by binary format version 1.
pub const PREAMBLE: [u8; 8] = [0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];

/// Leading byte of every function type.
pub const FUNC_FORM: u8 = 0x60;

/// Block type of a block or loop that produces no value.
pub const BLOCK_TYPE_VOID: u8 = 0x40;

/// The instructions the emitter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum Opcode {
    Block = 0x02,
    Loop = 0x03,
    End = 0x0b,
    Br = 0x0c,
    BrIf = 0x0d,
    Call = 0x10,
    LocalGet = 0x20,
    LocalSet = 0x21,
    I32Store8 = 0x3a,
    I32Const = 0x41,
    F32Const = 0x43,
    I32Eqz = 0x45,
    I32Eq = 0x46,
    F32Eq = 0x5b,
    F32Lt = 0x5d,
    F32Gt = 0x5e,
    F32Le = 0x5f,
    F32Ge = 0x60,
    I32And = 0x71,
    F32Add = 0x92,
    F32Sub = 0x93,
    F32Mul = 0x94,
    F32Div = 0x95,
    I32TruncF32S = 0xa8,
}

impl From<BinaryOp> for Opcode {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add => Self::F32Add,
            BinaryOp::Sub => Self::F32Sub,
            BinaryOp::Mul => Self::F32Mul,
            BinaryOp::Div => Self::F32Div,
            BinaryOp::Eq => Self::F32Eq,
            BinaryOp::Lt => Self::F32Lt,
            BinaryOp::Gt => Self::F32Gt,
            BinaryOp::Le => Self::F32Le,
            BinaryOp::Ge => Self::F32Ge,
            // comparisons produce i32 booleans
            BinaryOp::And => Self::I32And,
        }
    }
}

/// Ids of the sections a module is made of, in the order they are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum SectionId {
    Type = 0x01,
    Import = 0x02,
    Function = 0x03,
    Export = 0x07,
    Code = 0x0a,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum ValType {
    I32 = 0x7f,
    F32 = 0x7d,
}

/// The kind of an import or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(u8)]
pub enum ExternalKind {
    Function = 0x00,
    Memory = 0x02,
}
