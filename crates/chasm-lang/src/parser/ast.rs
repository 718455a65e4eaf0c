use std::fmt;

use smol_str::SmolStr;

pub type Ident = SmolStr;

/// A parsed program. Procedure order is significant: it fixes function indices in the emitted
/// module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub procs: Vec<ProcDef>,
}

impl Program {
    pub fn new(procs: Vec<ProcDef>) -> Self {
        Self { procs }
    }

    /// Find the first procedure with the given name, along with its position in the program.
    pub fn find(&self, name: &str) -> Option<(usize, &ProcDef)> {
        self.procs
            .iter()
            .enumerate()
            .find(|(_, proc)| proc.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcDef {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Print(Print),
    VarDecl(VarDecl),
    VarAssign(VarAssign),
    While(While),
    If(If),
    Call(Call),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: Ident,
    pub init: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarAssign {
    pub name: Ident,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct While {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Expr,
    pub consequent: Vec<Stmt>,
    /// Empty when the source has no `else` branch.
    pub alternate: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Ident,
    pub args: Vec<Expr>,
}

impl Call {
    /// The builtin that writes a byte to the pixel grid.
    pub const SETPIXEL: &'static str = "setpixel";

    pub fn is_setpixel(&self) -> bool {
        self.name == Self::SETPIXEL
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f32),
    Ident(Ident),
    Binary(Binary),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
    And,
}

impl BinaryOp {
    pub fn from_symbol(s: &str) -> Option<Self> {
        let op = match s {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "==" => Self::Eq,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::Le,
            ">=" => Self::Ge,
            "&&" => Self::And,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Eq => "==",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::And => "&&",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Ident(name) => f.write_str(name),
            Expr::Binary(Binary { op, left, right }) => write!(f, "({left} {op} {right})"),
        }
    }
}
