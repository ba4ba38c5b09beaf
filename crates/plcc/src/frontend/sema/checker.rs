//! Type checker
//!
//! Walks a parsed program once, in source order. Each identifier is bound
//! to its declaration, each expression gets a type, and each implicit
//! conversion is recorded in the `coerce_to` slot of the expression that
//! must be converted. The first violation aborts the pass.

use super::rules::{self, Coercion};
use super::symbol_table::SymbolTable;
use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::ast::*;
use crate::types::Type;
use log::{debug, trace};

/// Type checker for a single PLC program
#[derive(Debug, Default)]
pub struct TypeChecker {
    symbols: SymbolTable,
    /// Declaration arena, taken from the program while the check runs
    decls: Vec<Declaration>,
    return_type: Option<Type>,
    /// Coordinate names bound by the `im[x, y] = ...` being checked
    pixel_coords: Option<(String, String)>,
}

impl TypeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type check `program`, annotating it in place.
    ///
    /// Annotations from an earlier run are cleared first, so checking the
    /// same tree twice gives the same outcome.
    pub fn check(&mut self, program: &mut Program) -> CompileResult<()> {
        debug!("type checking program '{}'", program.name);

        self.symbols = SymbolTable::new();
        self.return_type = program.return_type;
        self.pixel_coords = None;
        self.decls = std::mem::take(&mut program.decls);
        for decl in &mut self.decls {
            decl.initialized = false;
        }

        let result = self.check_program(&program.params, &mut program.body, program.span);
        program.decls = std::mem::take(&mut self.decls);

        match &result {
            Ok(()) => debug!(
                "program '{}' is well typed ({} declarations)",
                program.name,
                self.symbols.len()
            ),
            Err(err) => debug!("type check of '{}' failed: {}", program.name, err),
        }
        result
    }

    fn check_program(&mut self, params: &[DeclId], body: &mut [Stmt], span: Span) -> CompileResult<()> {
        for &param in params {
            self.declare(param, span)?;
            self.mark_initialized(param);
        }
        for stmt in body {
            self.check_stmt(stmt)?;
        }
        Ok(())
    }

    // ==================== Declarations ====================

    /// Arena index of `id`, or an internal error if the tree refers to a
    /// declaration the program does not own
    fn arena_index(&self, id: DeclId, span: Span) -> CompileResult<usize> {
        if id.index() < self.decls.len() {
            Ok(id.index())
        } else {
            Err(CompileError::internal(
                format!(
                    "declaration #{} is outside the program's {} declarations",
                    id.index(),
                    self.decls.len()
                ),
                span,
            ))
        }
    }

    /// Enter a declaration into the symbol table and check its dimension
    fn declare(&mut self, id: DeclId, span: Span) -> CompileResult<Type> {
        let index = self.arena_index(id, span)?;
        let decl = &self.decls[index];
        if !self.symbols.insert(&decl.name, id) {
            return Err(CompileError::type_error(
                format!("variable '{}' is already declared", decl.name),
                decl.span,
            ));
        }
        trace!("declared '{}': {}", decl.name, decl.ty);
        let ty = decl.ty;

        if let Some(mut dim) = self.decls[index].dim.take() {
            let result = self.check_dimension(&mut dim);
            self.decls[index].dim = Some(dim);
            result?;
        }
        Ok(ty)
    }

    fn check_dimension(&mut self, dim: &mut Dimension) -> CompileResult<()> {
        let width = self.check_expr(&mut dim.width)?;
        if width != Type::Int {
            return Err(CompileError::type_error(
                format!("image width must be int, found {}", width),
                dim.width.span,
            ));
        }
        let height = self.check_expr(&mut dim.height)?;
        if height != Type::Int {
            return Err(CompileError::type_error(
                format!("image height must be int, found {}", height),
                dim.height.span,
            ));
        }
        Ok(())
    }

    /// `id` must already have been validated by [`Self::declare`]
    fn mark_initialized(&mut self, id: DeclId) {
        if let Some(decl) = self.decls.get_mut(id.index()) {
            decl.initialized = true;
            trace!("'{}' is initialized", decl.name);
        }
    }

    /// Resolve the variable named on the left of `=` or `<-`
    fn resolve_target(&self, target: &mut Target) -> CompileResult<DeclId> {
        let id = self.symbols.lookup(&target.name).ok_or_else(|| {
            CompileError::type_error(format!("undefined identifier '{}'", target.name), target.span)
        })?;
        target.decl = Some(id);
        Ok(id)
    }

    // ==================== Statements ====================

    fn check_stmt(&mut self, stmt: &mut Stmt) -> CompileResult<()> {
        let span = stmt.span;
        debug!("checking statement at {}", span);

        match &mut stmt.kind {
            StmtKind::VarDecl { decl, init } => self.check_var_decl(*decl, init.as_mut(), span),
            StmtKind::Assign { target, value } => self.check_assignment(target, value, span),
            StmtKind::Read { target, source } => self.check_read(target, source),
            StmtKind::Write { source, dest } => self.check_write(source, dest),
            StmtKind::Return(value) => self.check_return(value, span),
        }
    }

    fn check_var_decl(
        &mut self,
        id: DeclId,
        init: Option<&mut Initializer>,
        span: Span,
    ) -> CompileResult<()> {
        let ty = self.declare(id, span)?;
        let decl = &self.decls[id.index()];
        let name = decl.name.clone();
        let has_dim = decl.dim.is_some();

        let Some(init) = init else {
            if ty == Type::Image {
                if !has_dim {
                    return Err(CompileError::type_error(
                        format!("image '{}' needs a dimension or an initializer", name),
                        span,
                    ));
                }
                // The dimension allocates the pixels
                self.mark_initialized(id);
            }
            return Ok(());
        };

        let value_ty = self.check_expr(&mut init.expr)?;
        if ty == Type::Image && !has_dim && value_ty != Type::Image {
            return Err(CompileError::type_error(
                format!(
                    "image '{}' without a dimension must be initialized from an image, found {}",
                    name, value_ty
                ),
                init.expr.span,
            ));
        }

        match init.op {
            InitOp::Assign => {
                let coercion = rules::assign_coercion(ty, value_ty).ok_or_else(|| {
                    CompileError::type_error(
                        format!(
                            "incompatible types in initialization of '{}': cannot assign {} to {}",
                            name, value_ty, ty
                        ),
                        init.expr.span,
                    )
                })?;
                apply(&mut init.expr, coercion);
                self.mark_initialized(id);
            }
            InitOp::Read => {
                // Left uninitialized until a read statement fills it
                if !value_ty.is_io_endpoint() {
                    return Err(CompileError::type_error(
                        format!(
                            "read source must be console or string, found {} after '{}' in declaration of '{}'",
                            value_ty,
                            init.op.as_str(),
                            name
                        ),
                        init.expr.span,
                    ));
                }
            }
        }
        Ok(())
    }

    fn check_assignment(&mut self, target: &mut Target, value: &mut Expr, span: Span) -> CompileResult<()> {
        let id = self.resolve_target(target)?;
        let target_ty = self.decls[id.index()].ty;

        let (value_ty, coercion) = if target_ty != Type::Image {
            if target.selector.is_some() {
                return Err(CompileError::type_error(
                    format!("non-image cannot have a pixel selector: '{}' is {}", target.name, target_ty),
                    target.span,
                ));
            }
            let value_ty = self.check_expr(value)?;
            (value_ty, rules::assign_coercion(target_ty, value_ty))
        } else if let Some(selector) = target.selector.as_mut() {
            let coords = self.bind_pixel_coordinates(selector)?;
            let outer = self.pixel_coords.replace(coords);
            let value_ty = self.check_expr(value);
            self.pixel_coords = outer;
            let value_ty = value_ty?;
            (value_ty, rules::pixel_write_coercion(value_ty))
        } else {
            let value_ty = self.check_expr(value)?;
            (value_ty, rules::image_fill_coercion(value_ty))
        };

        let coercion = coercion.ok_or_else(|| {
            CompileError::type_error(
                format!(
                    "incompatible types in assignment to '{}': cannot assign {} to {}",
                    target.name, value_ty, target_ty
                ),
                span,
            )
        })?;
        apply(value, coercion);
        self.mark_initialized(id);
        Ok(())
    }

    /// Bind the coordinate names of an assignment's pixel selector
    fn bind_pixel_coordinates(&self, selector: &mut PixelSelector) -> CompileResult<(String, String)> {
        let x = self.bind_pixel_coordinate(&mut selector.x)?;
        let y = self.bind_pixel_coordinate(&mut selector.y)?;
        Ok((x, y))
    }

    fn bind_pixel_coordinate(&self, expr: &mut Expr) -> CompileResult<String> {
        let ExprKind::Identifier { name, binding } = &mut expr.kind else {
            return Err(CompileError::type_error(
                "pixel selector of an assignment target must name coordinate variables",
                expr.span,
            ));
        };
        if self.symbols.lookup(name).is_some() {
            return Err(CompileError::type_error(
                format!("pixel coordinate '{}' conflicts with a declared variable", name),
                expr.span,
            ));
        }
        *binding = Some(Binding::PixelCoordinate);
        expr.ty = Some(Type::Int);
        expr.coerce_to = None;
        Ok(name.clone())
    }

    fn check_read(&mut self, target: &mut Target, source: &mut Expr) -> CompileResult<()> {
        let id = self.resolve_target(target)?;
        if target.selector.is_some() {
            return Err(CompileError::type_error(
                format!("read target '{}' cannot have a pixel selector", target.name),
                target.span,
            ));
        }
        let source_ty = self.check_expr(source)?;
        check_read_source(source_ty, source.span)?;
        self.mark_initialized(id);
        Ok(())
    }

    fn check_write(&mut self, source: &mut Expr, dest: &mut Expr) -> CompileResult<()> {
        let source_ty = self.check_expr(source)?;
        let dest_ty = self.check_expr(dest)?;
        if !dest_ty.is_io_endpoint() {
            return Err(CompileError::type_error(
                format!("illegal destination type for write: {}", dest_ty),
                dest.span,
            ));
        }
        if source_ty == Type::Console {
            return Err(CompileError::type_error(
                format!("illegal source type for write: {}", source_ty),
                source.span,
            ));
        }
        Ok(())
    }

    fn check_return(&mut self, value: &mut Expr, span: Span) -> CompileResult<()> {
        let value_ty = self.check_expr(value)?;
        match self.return_type {
            Some(expected) if expected == value_ty => Ok(()),
            Some(expected) => Err(CompileError::type_error(
                format!("return type mismatch: expected {}, found {}", expected, value_ty),
                span,
            )),
            None => Err(CompileError::type_error("void program cannot return a value", span)),
        }
    }

    // ==================== Expressions ====================

    /// Type `expr` and its subtree. Returns the type the parent sees,
    /// which is the recorded coercion if the node carries one.
    fn check_expr(&mut self, expr: &mut Expr) -> CompileResult<Type> {
        let span = expr.span;
        expr.coerce_to = None;

        let ty = match &mut expr.kind {
            ExprKind::BoolLiteral(_) => Type::Boolean,
            ExprKind::IntLiteral(_) => Type::Int,
            ExprKind::FloatLiteral(_) => Type::Float,
            ExprKind::StringLiteral(_) => Type::String,
            ExprKind::ColorConst(_) => Type::Color,
            ExprKind::Console => Type::Console,

            ExprKind::Color { red, green, blue } => {
                let r = self.check_expr(red)?;
                let g = self.check_expr(green)?;
                let b = self.check_expr(blue)?;
                if r != g || r != b {
                    return Err(CompileError::type_error(
                        format!("color components must have same type, found {}, {} and {}", r, g, b),
                        span,
                    ));
                }
                match r {
                    Type::Int => Type::Color,
                    Type::Float => Type::ColorFloat,
                    other => {
                        return Err(CompileError::type_error(
                            format!("color component type must be int or float, found {}", other),
                            span,
                        ));
                    }
                }
            }

            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                let cond_ty = self.check_expr(condition)?;
                if cond_ty != Type::Boolean {
                    return Err(CompileError::type_error(
                        format!("condition must be boolean, found {}", cond_ty),
                        condition.span,
                    ));
                }
                let then_ty = self.check_expr(then_expr)?;
                let else_ty = self.check_expr(else_expr)?;
                if then_ty != else_ty {
                    return Err(CompileError::type_error(
                        format!(
                            "conditional branches must have the same type, found {} and {}",
                            then_ty, else_ty
                        ),
                        span,
                    ));
                }
                then_ty
            }

            ExprKind::Unary { op, operand } => {
                let operand_ty = self.check_expr(operand)?;
                rules::unary_result(*op, operand_ty).ok_or_else(|| {
                    CompileError::type_error(
                        format!(
                            "incompatible types for unary expression: '{}' applied to {}",
                            op.as_str(),
                            operand_ty
                        ),
                        span,
                    )
                })?
            }

            ExprKind::PixelAccess { image, selector } => {
                let image_ty = self.check_expr(image)?;
                if image_ty != Type::Image {
                    return Err(CompileError::type_error(
                        format!("pixel selector applied to non-image of type {}", image_ty),
                        span,
                    ));
                }
                self.check_pixel_selector(selector)?;
                // The pixel is read as a packed int and unpacked into a color
                expr.coerce_to = Some(Type::Color);
                Type::Int
            }

            ExprKind::Binary { op, left, right } => {
                let left_ty = self.check_expr(left)?;
                let right_ty = self.check_expr(right)?;
                let rule = rules::binary_rule(*op, left_ty, right_ty).ok_or_else(|| {
                    CompileError::type_error(
                        format!(
                            "incompatible types for operator '{}': {} and {}",
                            op.as_str(),
                            left_ty,
                            right_ty
                        ),
                        span,
                    )
                })?;
                if let Some(to) = rule.coerce_left {
                    coerce(left, to);
                }
                if let Some(to) = rule.coerce_right {
                    coerce(right, to);
                }
                rule.result
            }

            ExprKind::Identifier { name, binding } => {
                if self.is_pixel_coordinate(name) {
                    *binding = Some(Binding::PixelCoordinate);
                    Type::Int
                } else {
                    let id = self.resolve_use(name, span)?;
                    *binding = Some(Binding::Decl(id));
                    self.decls[id.index()].ty
                }
            }
        };

        expr.ty = Some(ty);
        Ok(expr.coerce_to.unwrap_or(ty))
    }

    fn check_pixel_selector(&mut self, selector: &mut PixelSelector) -> CompileResult<()> {
        self.check_selector_component(&mut selector.x)?;
        self.check_selector_component(&mut selector.y)
    }

    fn check_selector_component(&mut self, coord: &mut Expr) -> CompileResult<()> {
        let ty = self.check_expr(coord)?;
        if ty != Type::Int {
            return Err(CompileError::type_error(
                format!("only ints as pixel selector components, found {}", ty),
                coord.span,
            ));
        }
        Ok(())
    }

    fn is_pixel_coordinate(&self, name: &str) -> bool {
        self.pixel_coords
            .as_ref()
            .is_some_and(|(x, y)| x == name || y == name)
    }

    /// Resolve an identifier that is read, which requires a value
    fn resolve_use(&self, name: &str, span: Span) -> CompileResult<DeclId> {
        let id = self
            .symbols
            .lookup(name)
            .ok_or_else(|| CompileError::type_error(format!("undefined identifier '{}'", name), span))?;
        let decl = &self.decls[id.index()];
        if !decl.initialized {
            return Err(CompileError::type_error(
                format!("uninitialized identifier used: '{}'", decl.name),
                span,
            ));
        }
        Ok(id)
    }
}

fn check_read_source(ty: Type, span: Span) -> CompileResult<()> {
    if ty.is_io_endpoint() {
        Ok(())
    } else {
        Err(CompileError::type_error(
            format!("read source must be console or string, found {}", ty),
            span,
        ))
    }
}

fn coerce(expr: &mut Expr, to: Type) {
    trace!("coercing expression at {} to {}", expr.span, to);
    expr.coerce_to = Some(to);
}

fn apply(expr: &mut Expr, coercion: Coercion) {
    if let Coercion::To(to) = coercion {
        coerce(expr, to);
    }
}
