// tests/harness/mod.rs
//! Reference interpreter for checking what generated code computes.
//!
//! Registers are untyped 32-bit cells, as in the VM: `stor` copies raw bits
//! and each opcode decides how to read its operands. A callee's frame starts
//! at the caller's call window, so arguments are its first registers and
//! `ret` copies its values back over that window.

#![allow(dead_code)]

use bumpalo::Bump;
use dash::{AstBuilder, CompilationError, Module, OpCode, TypeKind, VmContext, Word};
use std::sync::Once;

const STEP_LIMIT: usize = 1_000_000;

/// A typed value crossing the interpreter boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i32),
    Real(f32),
}

impl Value {
    fn bits(self) -> u32 {
        match self {
            Value::Int(v) => v as u32,
            Value::Real(v) => v.to_bits(),
        }
    }

    fn from_bits(bits: u32, ty: TypeKind) -> Self {
        match ty {
            TypeKind::Real => Value::Real(f32::from_bits(bits)),
            _ => Value::Int(bits as i32),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Trap {
    #[error("no procedure named `{0}`")]
    UnknownProcedure(String),
    #[error("procedure {0} has no code")]
    NotCompiled(usize),
    #[error("bad instruction at word {0}")]
    BadInstruction(usize),
    #[error("integer division by zero at word {0}")]
    DivideByZero(usize),
    #[error("step limit exceeded")]
    StepLimit,
}

struct Frame {
    /// Absolute register index of r0.
    base: usize,
    /// Word to resume at in the caller.
    return_pc: usize,
}

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a module in a fresh arena and import it into a new context.
pub fn build<F>(f: F) -> Result<VmContext, CompilationError>
where
    F: for<'ast> FnOnce(&AstBuilder<'ast>) -> Module<'ast>,
{
    init_tracing();
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let module = f(&ast);
    let mut vm = VmContext::new();
    dash::import_module(&mut vm, &module)?;
    Ok(vm)
}

/// Call `name` with `args` and return its outputs.
pub fn call(vm: &VmContext, name: &str, args: &[Value]) -> Result<Vec<Value>, Trap> {
    let (index, entry) = vm
        .procedures()
        .lookup(name)
        .ok_or_else(|| Trap::UnknownProcedure(name.to_string()))?;

    let mut regs: Vec<u32> = args.iter().map(|v| v.bits()).collect();
    let raw = Interpreter { vm, regs: &mut regs }.run(index)?;
    Ok(raw
        .into_iter()
        .zip(&entry.outputs)
        .map(|(bits, &ty)| Value::from_bits(bits, ty))
        .collect())
}

struct Interpreter<'a> {
    vm: &'a VmContext,
    regs: &'a mut Vec<u32>,
}

impl Interpreter<'_> {
    fn enter(&mut self, index: usize, base: usize) -> Result<usize, Trap> {
        let entry = self.vm.procedures().get(index).ok_or(Trap::NotCompiled(index))?;
        let code = entry.code.ok_or(Trap::NotCompiled(index))?;
        let needed = base + usize::from(entry.register_count);
        if self.regs.len() < needed {
            self.regs.resize(needed, 0);
        }
        tracing::trace!(procedure = %entry.name, base, "enter");
        Ok(code.entry)
    }

    fn run(mut self, index: usize) -> Result<Vec<u32>, Trap> {
        let vm = self.vm;
        let words = vm.code().words();
        let mut frames = vec![Frame {
            base: 0,
            return_pc: usize::MAX,
        }];
        let mut pc = self.enter(index, 0)?;

        for _ in 0..STEP_LIMIT {
            let at = pc;
            let word = *words.get(at).ok_or(Trap::BadInstruction(at))?;
            let op = word.opcode().ok_or(Trap::BadInstruction(at))?;
            let imm = if op.has_immediate() {
                Some(*words.get(at + 1).ok_or(Trap::BadInstruction(at))?)
            } else {
                None
            };
            pc += op.width();

            let base = frames.last().map_or(0, |f| f.base);
            let (a, b, c) = (
                base + usize::from(word.a()),
                base + usize::from(word.b()),
                base + usize::from(word.c()),
            );
            let imm = imm.unwrap_or(Word::ZERO);

            match op {
                OpCode::Nop => {}
                OpCode::Stor => self.regs[c] = imm.imm_bits(),
                OpCode::Mov => self.regs[c] = self.regs[a],
                OpCode::AddI => self.int_op(a, b, c, i32::wrapping_add),
                OpCode::SubI => self.int_op(a, b, c, i32::wrapping_sub),
                OpCode::MulI => self.int_op(a, b, c, i32::wrapping_mul),
                OpCode::DivI => {
                    if self.regs[b] == 0 {
                        return Err(Trap::DivideByZero(at));
                    }
                    self.int_op(a, b, c, i32::wrapping_div);
                }
                OpCode::AddF => self.real_op(a, b, c, |x, y| x + y),
                OpCode::SubF => self.real_op(a, b, c, |x, y| x - y),
                OpCode::MulF => self.real_op(a, b, c, |x, y| x * y),
                OpCode::DivF => self.real_op(a, b, c, |x, y| x / y),
                OpCode::CmpLI => self.regs[c] = u32::from(self.int(a) < self.int(b)),
                OpCode::CmpLeI => self.regs[c] = u32::from(self.int(a) <= self.int(b)),
                OpCode::CmpLF => self.regs[c] = u32::from(self.real(a) < self.real(b)),
                OpCode::CmpLeF => self.regs[c] = u32::from(self.real(a) <= self.real(b)),
                OpCode::CastI => self.regs[c] = (self.real(a) as i32) as u32,
                OpCode::CastF => self.regs[c] = (self.int(a) as f32).to_bits(),
                OpCode::Call => {
                    frames.push(Frame { base: b, return_pc: pc });
                    pc = self.enter(usize::from(word.a()), b)?;
                }
                OpCode::Ret => {
                    let count = usize::from(word.b());
                    let values = self.regs[a..a + count].to_vec();
                    let Some(frame) = frames.pop() else {
                        return Err(Trap::BadInstruction(at));
                    };
                    if frames.is_empty() {
                        return Ok(values);
                    }
                    // The callee frame began at the caller's window.
                    self.regs[frame.base..frame.base + count].copy_from_slice(&values);
                    pc = frame.return_pc;
                }
                OpCode::Jmp => pc = jump(pc, imm),
                OpCode::Jz => {
                    if self.regs[a] == 0 {
                        pc = jump(pc, imm);
                    }
                }
            }
        }
        Err(Trap::StepLimit)
    }

    fn int(&self, r: usize) -> i32 {
        self.regs[r] as i32
    }

    fn real(&self, r: usize) -> f32 {
        f32::from_bits(self.regs[r])
    }

    fn int_op(&mut self, a: usize, b: usize, c: usize, f: impl Fn(i32, i32) -> i32) {
        self.regs[c] = f(self.int(a), self.int(b)) as u32;
    }

    fn real_op(&mut self, a: usize, b: usize, c: usize, f: impl Fn(f32, f32) -> f32) {
        self.regs[c] = f(self.real(a), self.real(b)).to_bits();
    }
}

fn jump(pc: usize, imm: Word) -> usize {
    (pc as isize + imm.as_int() as isize) as usize
}
