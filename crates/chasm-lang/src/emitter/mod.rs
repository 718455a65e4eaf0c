mod error;
pub mod opcode;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};
use wasm_encode::WasmWriteExt;

pub use self::error::*;
use self::opcode::*;
use crate::{
    parser::ast::*,
    traverse::{traverse, Node},
};

/// Function index of the imported `env.print`. User procedures are numbered after it.
const PRINT_FUNC: u32 = 0;
/// Type index of `env.print`.
const PRINT_TYPE: u32 = 0;
/// Width of the pixel grid `setpixel` writes to.
const GRID_WIDTH: f32 = 100.0;
/// Locals `setpixel` stores its arguments in before computing the pixel address.
const SETPIXEL_SLOTS: [&str; 3] = ["x", "y", "color"];

/// Lower a [`Program`] to a binary WebAssembly module.
pub fn emit(program: &Program) -> Result<Vec<u8>> {
    Emitter::new(program).emit()
}

/// Assembles the sections of a module from a [`Program`].
#[derive(Debug)]
pub struct Emitter<'a> {
    program: &'a Program,
}

impl<'a> Emitter<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self { program }
    }

    pub fn emit(&self) -> Result<Vec<u8>> {
        debug!(procs = self.program.procs.len(), "began emitting module");
        let main = self.main_index()?;
        self.check_unique_names()?;

        let mut out = PREAMBLE.to_vec();
        out.write_section(SectionId::Type.into(), &self.type_section()?)?;
        out.write_section(SectionId::Import.into(), &import_section()?)?;
        out.write_section(SectionId::Function.into(), &self.function_section()?)?;
        out.write_section(SectionId::Export.into(), &export_section(main)?)?;
        out.write_section(SectionId::Code.into(), &self.code_section()?)?;

        debug!(bytes = out.len(), "finished emitting module");
        Ok(out)
    }

    /// The function index `run` exports.
    fn main_index(&self) -> Result<u32> {
        let mains = self
            .program
            .procs
            .iter()
            .filter(|proc| proc.name == "main")
            .count();
        if mains > 1 {
            return Err(EmitError::DuplicateMain(mains));
        }
        let (pos, main) = self.program.find("main").ok_or(EmitError::MissingMain)?;
        if !main.params.is_empty() {
            return Err(EmitError::MainHasParameters(main.params.len()));
        }
        Ok(func_index(pos))
    }

    fn check_unique_names(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for proc in &self.program.procs {
            if !seen.insert(&proc.name) {
                return Err(EmitError::DuplicateProcedure(proc.name.clone()));
            }
        }
        Ok(())
    }

    /// The print type, then one type per procedure. Identical signatures are not merged.
    fn type_section(&self) -> Result<Vec<u8>> {
        let mut types = vec![func_type(1)?];
        for proc in &self.program.procs {
            types.push(func_type(proc.params.len())?);
        }
        let mut section: Vec<u8> = vec![];
        section.write_vector(&types)?;
        Ok(section)
    }

    fn function_section(&self) -> Result<Vec<u8>> {
        let indices = (0..self.program.procs.len())
            .map(|pos| -> Result<Vec<u8>> {
                let mut index: Vec<u8> = vec![];
                // procedure types follow the print type
                index.write_u32_leb128(func_index(pos))?;
                Ok(index)
            })
            .collect::<Result<Vec<_>>>()?;
        let mut section: Vec<u8> = vec![];
        section.write_vector(&indices)?;
        Ok(section)
    }

    fn code_section(&self) -> Result<Vec<u8>> {
        let bodies = self
            .program
            .procs
            .iter()
            .map(|proc| ProcEmitter::new(self.program, proc).emit())
            .collect::<Result<Vec<_>>>()?;
        let mut section: Vec<u8> = vec![];
        section.write_vector(&bodies)?;
        Ok(section)
    }
}

fn func_index(pos: usize) -> u32 {
    pos as u32 + 1
}

/// A function type taking `params` f32s and returning nothing.
fn func_type(params: usize) -> Result<Vec<u8>> {
    let mut ty = vec![FUNC_FORM];
    ty.write_byte_vector(&vec![u8::from(ValType::F32); params])?;
    ty.write_byte_vector(&[])?;
    Ok(ty)
}

fn import_section() -> Result<Vec<u8>> {
    let mut print: Vec<u8> = vec![];
    print.write_name("env")?;
    print.write_name("print")?;
    print.push(ExternalKind::Function.into());
    print.write_u32_leb128(PRINT_TYPE)?;

    let mut memory: Vec<u8> = vec![];
    memory.write_name("env")?;
    memory.write_name("memory")?;
    memory.push(ExternalKind::Memory.into());
    // limits with no maximum, minimum of one page
    memory.push(0x00);
    memory.write_u32_leb128(1)?;

    let mut section: Vec<u8> = vec![];
    section.write_vector(&[print, memory])?;
    Ok(section)
}

fn export_section(main: u32) -> Result<Vec<u8>> {
    let mut run: Vec<u8> = vec![];
    run.write_name("run")?;
    run.push(ExternalKind::Function.into());
    run.write_u32_leb128(main)?;

    let mut section: Vec<u8> = vec![];
    section.write_vector(&[run])?;
    Ok(section)
}

/// Maps the identifiers of a single procedure to dense local slots.
///
/// Parameters occupy the first slots. Every other identifier gets the next free slot the first
/// time it is bound.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Locals {
    slots: FxHashMap<Ident, u32>,
    len: u32,
}

impl Locals {
    /// Create a slot table seeded with `params`, in declaration order.
    pub fn with_params(params: &[Ident]) -> Self {
        let mut locals = Self::default();
        for param in params {
            // a repeated parameter name refers to its last occurrence
            locals.slots.insert(param.clone(), locals.len);
            locals.len += 1;
        }
        locals
    }

    /// Return the slot of `name`, allocating a new one if it has none yet.
    pub fn bind(&mut self, name: &str) -> u32 {
        if let Some(slot) = self.get(name) {
            return slot;
        }
        let slot = self.len;
        trace!(name, slot, "allocated local");
        self.slots.insert(name.into(), slot);
        self.len += 1;
        slot
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.slots.get(name).copied()
    }

    /// The number of slots in the table, parameters included.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Lowers the body of one procedure.
#[derive(Debug)]
struct ProcEmitter<'a> {
    program: &'a Program,
    proc: &'a ProcDef,
    locals: Locals,
    code: Vec<u8>,
}

impl<'a> ProcEmitter<'a> {
    fn new(program: &'a Program, proc: &'a ProcDef) -> Self {
        Self {
            program,
            proc,
            locals: Locals::with_params(&proc.params),
            code: vec![],
        }
    }

    /// Emit the procedure as a size-prefixed function body.
    fn emit(mut self) -> Result<Vec<u8>> {
        let proc = self.proc;
        debug!(name = %proc.name, "began emitting procedure");
        self.emit_block(&proc.body)?;

        let mut body: Vec<u8> = vec![];
        if self.locals.is_empty() {
            body.write_u32_leb128(0)?;
        } else {
            // every slot, parameters included, is declared as one run of f32 locals
            body.write_u32_leb128(1)?;
            body.write_u32_leb128(self.locals.len())?;
            body.push(ValType::F32.into());
        }
        body.extend_from_slice(&self.code);
        body.push(Opcode::End.into());

        let mut out: Vec<u8> = vec![];
        out.write_byte_vector(&body)?;
        debug!(
            name = %proc.name,
            locals = self.locals.len(),
            bytes = out.len(),
            "finished emitting procedure"
        );
        Ok(out)
    }

    fn emit_block(&mut self, stmts: &[Stmt]) -> Result<()> {
        for stmt in stmts {
            self.emit_stmt(stmt)?;
        }
        Ok(())
    }

    fn emit_stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Print(Print { expr }) => {
                self.emit_expr(expr)?;
                self.op_u32(Opcode::Call, PRINT_FUNC)?;
            }
            Stmt::VarDecl(VarDecl { name, init: expr })
            | Stmt::VarAssign(VarAssign { name, value: expr }) => {
                self.emit_expr(expr)?;
                self.set_local(name)?;
            }
            Stmt::While(While { condition, body }) => {
                self.block(Opcode::Block);
                self.block(Opcode::Loop);
                self.emit_expr(condition)?;
                self.op(Opcode::I32Eqz);
                // leave the outer block once the condition is false
                self.op_u32(Opcode::BrIf, 1)?;
                self.emit_block(body)?;
                self.op_u32(Opcode::Br, 0)?;
                self.op(Opcode::End);
                self.op(Opcode::End);
            }
            Stmt::If(If {
                condition,
                consequent,
                alternate,
            }) => {
                self.block(Opcode::Block);
                self.emit_expr(condition)?;
                self.op(Opcode::I32Eqz);
                self.op_u32(Opcode::BrIf, 0)?;
                self.emit_block(consequent)?;
                self.op(Opcode::End);

                // the condition is evaluated again, after the consequent has run
                self.block(Opcode::Block);
                self.emit_expr(condition)?;
                self.op(Opcode::I32Const);
                self.code.write_s32_leb128(1)?;
                self.op(Opcode::I32Eq);
                self.op_u32(Opcode::BrIf, 0)?;
                self.emit_block(alternate)?;
                self.op(Opcode::End);
            }
            Stmt::Call(call) if call.is_setpixel() => self.emit_setpixel(&call.args)?,
            Stmt::Call(call) => self.emit_call(call)?,
        }
        Ok(())
    }

    /// Store the pixel at `y * 100 + x` of linear memory, truncating both the address and the
    /// color.
    fn emit_setpixel(&mut self, args: &[Expr]) -> Result<()> {
        if args.len() != SETPIXEL_SLOTS.len() {
            return Err(EmitError::SetpixelArity(args.len()));
        }
        for (arg, slot) in args.iter().zip(SETPIXEL_SLOTS) {
            self.emit_expr(arg)?;
            self.set_local(slot)?;
        }
        let [x, y, color] = SETPIXEL_SLOTS;

        self.get_local(y)?;
        self.op(Opcode::F32Const);
        self.code.write_f32_le(GRID_WIDTH)?;
        self.op(Opcode::F32Mul);
        self.get_local(x)?;
        self.op(Opcode::F32Add);
        self.op(Opcode::I32TruncF32S);
        self.get_local(color)?;
        self.op(Opcode::I32TruncF32S);
        self.op(Opcode::I32Store8);
        // alignment and offset
        self.code.write_u32_leb128(0)?;
        self.code.write_u32_leb128(0)?;
        Ok(())
    }

    fn emit_call(&mut self, call: &Call) -> Result<()> {
        let (pos, callee) = self
            .program
            .find(&call.name)
            .ok_or_else(|| EmitError::UndeclaredProcedure(call.name.clone()))?;
        if callee.params.len() != call.args.len() {
            return Err(EmitError::ArityMismatch {
                name: call.name.clone(),
                expected: callee.params.len(),
                found: call.args.len(),
            });
        }
        for arg in &call.args {
            self.emit_expr(arg)?;
        }
        self.op_u32(Opcode::Call, func_index(pos))
    }

    /// Emit `expr` in postfix order, leaving its value on the stack.
    fn emit_expr(&mut self, expr: &Expr) -> Result<()> {
        traverse(expr, &mut |node| -> Result<()> {
            let Node::Expr(expr) = node else {
                return Ok(());
            };
            match expr {
                Expr::Number(n) => {
                    self.op(Opcode::F32Const);
                    self.code.write_f32_le(*n)?;
                    Ok(())
                }
                Expr::Ident(name) => self.get_local(name),
                Expr::Binary(Binary { op, .. }) => {
                    self.op((*op).into());
                    Ok(())
                }
            }
        })
    }

    fn get_local(&mut self, name: &str) -> Result<()> {
        let slot = self
            .locals
            .get(name)
            .ok_or_else(|| EmitError::UndeclaredIdentifier {
                name: name.into(),
                procedure: self.proc.name.clone(),
            })?;
        self.op_u32(Opcode::LocalGet, slot)
    }

    fn set_local(&mut self, name: &str) -> Result<()> {
        let slot = self.locals.bind(name);
        self.op_u32(Opcode::LocalSet, slot)
    }

    fn block(&mut self, op: Opcode) {
        self.op(op);
        self.code.push(BLOCK_TYPE_VOID);
    }

    fn op(&mut self, op: Opcode) {
        self.code.push(op.into());
    }

    fn op_u32(&mut self, op: Opcode, immediate: u32) -> Result<()> {
        self.op(op);
        self.code.write_u32_leb128(immediate)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::{lexer::tokenize, parse};

    /// Prints the inner byte buffer in hexadecimal when debugged.
    #[derive(PartialEq)]
    struct PrettyBytes<'a> {
        buf: &'a [u8],
    }

    impl fmt::Debug for PrettyBytes<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let new_lines = self.buf.len() > 5;
            write!(f, "[")?;
            for (i, byte) in self.buf.iter().enumerate() {
                if new_lines {
                    write!(f, "\n  {byte:#04x},")?;
                } else if i == self.buf.len() - 1 {
                    write!(f, "{byte:#04x}")?;
                } else {
                    write!(f, "{byte:#04x}, ")?;
                }
            }
            if new_lines {
                writeln!(f)?;
            }
            write!(f, "]")
        }
    }

    impl<'a> From<&'a [u8]> for PrettyBytes<'a> {
        fn from(buf: &'a [u8]) -> Self {
            Self { buf }
        }
    }

    macro_rules! assert_bytes {
        ($buf:expr, [$($byte:expr),* $(,)?]) => {
            assert_eq!(
                PrettyBytes { buf: &[$($byte),*] },
                PrettyBytes::from($buf.as_slice())
            )
        };
    }

    fn program(src: &str) -> Program {
        parse(&tokenize(src).unwrap()).unwrap()
    }

    fn compile(src: &str) -> Result<Vec<u8>> {
        emit(&program(src))
    }

    /// The framed body of the procedure named `name`.
    fn body(src: &str, name: &str) -> Vec<u8> {
        let program = program(src);
        let (_, proc) = program.find(name).unwrap();
        ProcEmitter::new(&program, proc).emit().unwrap()
    }

    /// Read an unsigned LEB128 integer starting at `*pos`, advancing past it.
    fn read_size(buf: &[u8], pos: &mut usize) -> usize {
        let mut size = 0;
        let mut shift = 0;
        loop {
            let byte = buf[*pos];
            *pos += 1;
            size |= usize::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return size;
            }
            shift += 7;
        }
    }

    /// Split a module into `(id, payload)` pairs, after checking its preamble.
    fn sections(module: &[u8]) -> Vec<(u8, Vec<u8>)> {
        assert_eq!(PREAMBLE, module[..8]);
        let mut pos = 8;
        let mut sections = vec![];
        while pos < module.len() {
            let id = module[pos];
            pos += 1;
            let size = read_size(module, &mut pos);
            sections.push((id, module[pos..pos + size].to_vec()));
            pos += size;
        }
        sections
    }

    #[test_log::test]
    fn empty_main() {
        let module = compile("proc main() endproc").unwrap();
        assert_bytes!(
            module,
            [
                // preamble
                0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00,
                // type
                0x01, 0x08, 0x02, 0x60, 0x01, 0x7d, 0x00, 0x60, 0x00, 0x00,
                // import
                0x02, 0x1b, 0x02,
                0x03, 0x65, 0x6e, 0x76, 0x05, 0x70, 0x72, 0x69, 0x6e, 0x74, 0x00, 0x00,
                0x03, 0x65, 0x6e, 0x76, 0x06, 0x6d, 0x65, 0x6d, 0x6f, 0x72, 0x79, 0x02, 0x00, 0x01,
                // function
                0x03, 0x02, 0x01, 0x01,
                // export
                0x07, 0x07, 0x01, 0x03, 0x72, 0x75, 0x6e, 0x00, 0x01,
                // code
                0x0a, 0x04, 0x01, 0x02, 0x00, 0x0b,
            ]
        );
    }

    #[test]
    fn print_statements() {
        let body = body("proc main() print 8 print 24 endproc", "main");
        assert_bytes!(
            body,
            [
                0x10, 0x00,
                0x43, 0x00, 0x00, 0x00, 0x41, 0x10, 0x00,
                0x43, 0x00, 0x00, 0xc0, 0x41, 0x10, 0x00,
                0x0b,
            ]
        );
    }

    #[test]
    fn while_loop() {
        let body = body(
            "proc main() var f = 0 while (f < 5) f = (f + 1) print f endwhile endproc",
            "main",
        );
        assert_bytes!(
            body,
            [
                0x2c,
                // one run of a single f32 local
                0x01, 0x01, 0x7d,
                0x43, 0x00, 0x00, 0x00, 0x00, 0x21, 0x00,
                0x02, 0x40, 0x03, 0x40,
                0x20, 0x00, 0x43, 0x00, 0x00, 0xa0, 0x40, 0x5d,
                0x45, 0x0d, 0x01,
                0x20, 0x00, 0x43, 0x00, 0x00, 0x80, 0x3f, 0x92, 0x21, 0x00,
                0x20, 0x00, 0x10, 0x00,
                0x0c, 0x00, 0x0b, 0x0b,
                0x0b,
            ]
        );
    }

    #[test]
    fn if_else_evaluates_condition_twice() {
        let body = body(
            "proc foo(a) if (a > 0) print 1 else print 2 endif endproc proc main() endproc",
            "foo",
        );
        assert_bytes!(
            body,
            [
                0x30,
                0x01, 0x01, 0x7d,
                0x02, 0x40,
                0x20, 0x00, 0x43, 0x00, 0x00, 0x00, 0x00, 0x5e,
                0x45, 0x0d, 0x00,
                0x43, 0x00, 0x00, 0x80, 0x3f, 0x10, 0x00,
                0x0b,
                0x02, 0x40,
                0x20, 0x00, 0x43, 0x00, 0x00, 0x00, 0x00, 0x5e,
                0x41, 0x01, 0x46, 0x0d, 0x00,
                0x43, 0x00, 0x00, 0x00, 0x40, 0x10, 0x00,
                0x0b,
                0x0b,
            ]
        );
    }

    #[test]
    fn logical_and() {
        let body = body(
            "proc main() if ((1 < 2) && (3 > 2)) print 1 endif endproc",
            "main",
        );
        assert_bytes!(
            body,
            [
                0x45,
                0x00,
                0x02, 0x40,
                0x43, 0x00, 0x00, 0x80, 0x3f, 0x43, 0x00, 0x00, 0x00, 0x40, 0x5d,
                0x43, 0x00, 0x00, 0x40, 0x40, 0x43, 0x00, 0x00, 0x00, 0x40, 0x5e,
                0x71,
                0x45, 0x0d, 0x00,
                0x43, 0x00, 0x00, 0x80, 0x3f, 0x10, 0x00,
                0x0b,
                0x02, 0x40,
                0x43, 0x00, 0x00, 0x80, 0x3f, 0x43, 0x00, 0x00, 0x00, 0x40, 0x5d,
                0x43, 0x00, 0x00, 0x40, 0x40, 0x43, 0x00, 0x00, 0x00, 0x40, 0x5e,
                0x71,
                0x41, 0x01, 0x46, 0x0d, 0x00,
                0x0b,
                0x0b,
            ]
        );
    }

    #[test]
    fn setpixel() {
        let body = body("proc main() setpixel (1, 2, 3) endproc", "main");
        assert_bytes!(
            body,
            [
                0x2b,
                0x01, 0x03, 0x7d,
                0x43, 0x00, 0x00, 0x80, 0x3f, 0x21, 0x00,
                0x43, 0x00, 0x00, 0x00, 0x40, 0x21, 0x01,
                0x43, 0x00, 0x00, 0x40, 0x40, 0x21, 0x02,
                0x20, 0x01, 0x43, 0x00, 0x00, 0xc8, 0x42, 0x94,
                0x20, 0x00, 0x92, 0xa8,
                0x20, 0x02, 0xa8,
                0x3a, 0x00, 0x00,
                0x0b,
            ]
        );
    }

    #[test]
    fn calls_use_declaration_order() {
        let body = body(
            "proc foo(f) print (f + 1) endproc proc main() foo(28) endproc",
            "main",
        );
        assert_bytes!(
            body,
            [0x09, 0x00, 0x43, 0x00, 0x00, 0xe0, 0x41, 0x10, 0x01, 0x0b]
        );
    }

    #[test]
    fn params_take_first_slots() {
        let body = body(
            "proc foo(a, b) var c = a d = b print c endproc proc main() endproc",
            "foo",
        );
        assert_bytes!(
            body,
            [
                0x10,
                0x01, 0x04, 0x7d,
                0x20, 0x00, 0x21, 0x02,
                0x20, 0x01, 0x21, 0x03,
                0x20, 0x02, 0x10, 0x00,
                0x0b,
            ]
        );
    }

    #[test]
    fn slots_follow_encounter_order() {
        let body = body(
            "proc main() var b = 1 var a = 2 print a print b endproc",
            "main",
        );
        assert_bytes!(
            body,
            [
                0x1a,
                0x01, 0x02, 0x7d,
                0x43, 0x00, 0x00, 0x80, 0x3f, 0x21, 0x00,
                0x43, 0x00, 0x00, 0x00, 0x40, 0x21, 0x01,
                0x20, 0x01, 0x10, 0x00,
                0x20, 0x00, 0x10, 0x00,
                0x0b,
            ]
        );
    }

    #[test]
    fn locals_table() {
        let mut locals = Locals::with_params(&["a".into(), "b".into()]);
        assert_eq!(2, locals.len());
        assert_eq!(Some(1), locals.get("b"));
        assert_eq!(2, locals.bind("z"));
        assert_eq!(0, locals.bind("a"));
        assert_eq!(2, locals.bind("z"));
        assert_eq!(3, locals.bind("y"));
        assert_eq!(4, locals.len());
        assert_eq!(None, locals.get("x"));
        assert!(Locals::default().is_empty());
    }

    #[test]
    fn section_order() {
        let module = compile(
            "proc foo(a, b) print (a + b) endproc proc main() foo(1, 2) setpixel (1, 1, 1) endproc",
        )
        .unwrap();
        let ids = sections(&module)
            .into_iter()
            .map(|(id, _)| id)
            .collect::<Vec<_>>();
        assert_eq!(vec![1, 2, 3, 7, 10], ids);
    }

    #[test]
    fn one_type_per_proc() {
        let module = compile("proc a(x) endproc proc b(x) endproc proc main() endproc").unwrap();
        let sections = sections(&module);
        assert_bytes!(
            sections[0].1,
            [
                0x04,
                0x60, 0x01, 0x7d, 0x00,
                0x60, 0x01, 0x7d, 0x00,
                0x60, 0x01, 0x7d, 0x00,
                0x60, 0x00, 0x00,
            ]
        );
        assert_bytes!(sections[2].1, [0x03, 0x01, 0x02, 0x03]);
        // `run` exports main, which follows print, `a` and `b`
        assert_bytes!(sections[3].1, [0x01, 0x03, 0x72, 0x75, 0x6e, 0x00, 0x03]);
    }

    #[test]
    fn deterministic() {
        let src = "proc foo(f) print (f + 1) endproc proc main() var i = 0 \
                   while (i < 3) foo(i) i = (i + 1) endwhile endproc";
        assert_eq!(compile(src).unwrap(), compile(src).unwrap());
    }

    #[test]
    fn duplicate_main() {
        let err = compile("proc main() print 1 endproc proc main() print 2 endproc").unwrap_err();
        assert!(matches!(err, EmitError::DuplicateMain(2)));
        insta::assert_snapshot!(err, @"the `main` procedure was declared 2 times");
    }

    #[test]
    fn duplicate_procedure() {
        let err = compile(
            "proc foo() print 1 endproc proc foo(a) print a endproc proc main() foo() endproc",
        )
        .unwrap_err();
        insta::assert_snapshot!(err, @"procedure `foo` was declared more than once");
    }

    #[test]
    fn missing_main() {
        assert!(matches!(compile(""), Err(EmitError::MissingMain)));
        assert!(matches!(
            compile("proc foo() endproc"),
            Err(EmitError::MissingMain)
        ));
    }

    #[test]
    fn main_has_parameters() {
        let err = compile("proc main(a) endproc").unwrap_err();
        assert!(matches!(err, EmitError::MainHasParameters(1)));
    }

    #[test]
    fn undeclared_procedure() {
        let err = compile("proc main() foo(1) endproc").unwrap_err();
        insta::assert_snapshot!(err, @"call to undeclared procedure `foo`");
    }

    #[test]
    fn setpixel_arity() {
        let err = compile("proc main() setpixel (1, 2) endproc").unwrap_err();
        assert!(matches!(err, EmitError::SetpixelArity(2)));
    }

    #[test]
    fn arity_mismatch() {
        let err = compile("proc foo(a, b) endproc proc main() foo(1) endproc").unwrap_err();
        insta::assert_snapshot!(err, @"procedure `foo` takes 2 arguments, received 1");
    }

    #[test]
    fn undeclared_identifier() {
        let err = compile("proc main() print z endproc").unwrap_err();
        insta::assert_snapshot!(err, @"use of undeclared identifier `z` in procedure `main`");

        // the initializer is emitted before the name is bound
        let err = compile("proc main() var f = (f + 1) endproc").unwrap_err();
        assert!(matches!(
            err,
            EmitError::UndeclaredIdentifier { ref name, .. } if name == "f"
        ));
    }
}
