//! While loops.

use dash_ast::WhileStmt;

use super::{Result, StmtCompiler};

impl<'a> StmtCompiler<'a> {
    /// Compile a while loop.
    ///
    /// `continue` jumps back to the condition; `break` jumps past the loop.
    ///
    /// Bytecode layout:
    /// ```text
    /// head:
    /// [condition]
    /// jz cond -> exit
    /// [body]
    /// jmp -> head
    /// exit:
    /// ```
    pub fn compile_while<'ast>(&mut self, while_stmt: &WhileStmt<'ast>) -> Result<()> {
        let head = self.emitter.current_offset();
        let cond = self.compile_condition(while_stmt.condition)?;
        let exit_jump = self.emitter.emit_jump_if_zero(cond)?;
        self.regs.clear_temps();

        self.emitter.enter_loop(head);
        self.compile_scoped(while_stmt.body)?;
        self.emitter.emit_loop(head)?;

        // Breaks and the exit jump land on the same word.
        self.emitter.exit_loop()?;
        self.emitter.patch_jump(exit_jump)
    }
}

#[cfg(test)]
mod tests {
    use bumpalo::Bump;
    use dash_ast::{AstBuilder, BinaryOp};
    use dash_core::{CompilationError, TypeKind};

    use crate::bytecode::{Decoded, OpCode};
    use crate::testing::Fixture;

    const INT: TypeKind = TypeKind::Integer;

    #[test]
    fn loop_layout() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::with_vars(&[("i", INT)]);

        let cond = ast.binary(ast.var("i"), BinaryOp::Greater, ast.int(0));
        let step = ast.assign(&["i"], &[ast.binary(ast.var("i"), BinaryOp::Sub, ast.int(1))]);
        fx.stmt(&[]).compile(&ast.while_stmt(cond, step)).unwrap();

        fx.chunk().assert_opcodes(&[
            OpCode::Stor,
            OpCode::CmpLI,
            OpCode::Jz,
            OpCode::Stor,
            OpCode::SubI,
            OpCode::Mov,
            OpCode::Jmp,
        ]);
        let decoded: Vec<Decoded> = fx.chunk().instructions().collect();
        assert_eq!(decoded[2].jump_target(), Some(fx.chunk().len()));
        assert_eq!(decoded[6].jump_target(), Some(0));
    }

    #[test]
    fn break_and_continue_targets() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::with_vars(&[("go", INT)]);

        let body = ast.block_stmt(&[
            ast.if_stmt(ast.var("go"), ast.cont(), None),
            ast.brk(),
        ]);
        fx.stmt(&[]).compile(&ast.while_stmt(ast.var("go"), body)).unwrap();

        // jz(exit) jz(skip) jmp(continue) jmp(break) jmp(loop)
        let decoded: Vec<Decoded> = fx.chunk().instructions().collect();
        assert_eq!(decoded.len(), 5);
        let end = fx.chunk().len();
        assert_eq!(decoded[0].jump_target(), Some(end));
        assert_eq!(decoded[1].jump_target(), Some(decoded[3].offset));
        assert_eq!(decoded[2].jump_target(), Some(0));
        assert_eq!(decoded[3].jump_target(), Some(end));
        assert_eq!(decoded[4].jump_target(), Some(0));
        assert!(!fx.emitter.in_loop());
    }

    #[test]
    fn nested_break_exits_inner_loop_only() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::with_vars(&[("go", INT)]);

        let inner = ast.while_stmt(ast.var("go"), ast.brk());
        let outer = ast.while_stmt(ast.var("go"), inner);
        fx.stmt(&[]).compile(&outer).unwrap();

        // outer jz, inner jz, break, inner loop, outer loop
        let decoded: Vec<Decoded> = fx.chunk().instructions().collect();
        assert_eq!(decoded[2].jump_target(), Some(decoded[4].offset));
        assert_eq!(decoded[3].jump_target(), Some(decoded[1].offset));
        assert_eq!(decoded[4].jump_target(), Some(0));
    }

    #[test]
    fn multi_value_condition_rejected() {
        let arena = Bump::new();
        let ast = AstBuilder::new(&arena);
        let mut fx = Fixture::new().proc("pair", &[], &[INT, INT]);

        let err = fx
            .stmt(&[])
            .compile(&ast.while_stmt(ast.call("pair", &[]), ast.brk()))
            .unwrap_err();
        assert!(matches!(err, CompilationError::InvalidCondition { found, .. } if found.len() == 2));
        assert!(!fx.emitter.in_loop());
    }
}
