use crate::ast::Ast;
use crate::error::Error;
use crate::expr::Expr;
use crate::op::{Function, Op};
use cranelift::prelude::*;
use cranelift_module::{Linkage, Module};
use cranelift_simplejit::{SimpleJITBackend, SimpleJITBuilder};
use log::debug;
use std::mem;

const POW: &str = "pow";

/// Symbol name and implementation used by compiled code for `function`
fn symbol(function: Function) -> (&'static str, fn(f64) -> f64) {
    match function {
        Function::Sin => ("sin", libm::sin),
        Function::Cos => ("cos", libm::cos),
        Function::Tan => ("tan", libm::tan),
        Function::Log => ("log", libm::log),
        Function::Exp => ("exp", libm::exp),
    }
}

fn compile_error<E: ToString>(error: E) -> Error {
    Error::CompileError(error.to_string())
}

/// A formula compiled to machine code.
///
/// Functions and powers call into `libm`, so results can differ from
/// [`Expr::eval`](struct.Expr.html#method.eval) in the last bits.
pub struct JIT {
    function: fn(f64) -> f64,
    /// Owns the memory `function` points into
    _module: Module<SimpleJITBackend>,
}

impl JIT {
    /// Compile a parsed formula into machine code.
    pub fn compile(expr: &Expr) -> Result<JIT, Error> {
        let mut builder = SimpleJITBuilder::new(cranelift_module::default_libcall_names());
        let _s = builder.symbol(POW, libm::pow as *const u8);
        for &function in &Function::ALL {
            let (name, implementation) = symbol(function);
            let _s = builder.symbol(name, implementation as *const u8);
        }
        let mut module: Module<SimpleJITBackend> = Module::new(builder);
        let mut ctx = module.make_context();
        let mut builder_context = FunctionBuilderContext::new();

        // fn(x: f64) -> f64
        ctx.func.signature.params.push(AbiParam::new(types::F64));
        ctx.func.signature.returns.push(AbiParam::new(types::F64));

        {
            let mut builder = FunctionBuilder::new(&mut ctx.func, &mut builder_context);
            let entry_block = builder.create_block();
            builder.append_block_params_for_function_params(entry_block);
            builder.switch_to_block(entry_block);
            builder.seal_block(entry_block);
            let x = builder.block_params(entry_block)[0];

            let mut trans = FunctionTranslator {
                builder,
                x,
                module: &mut module,
            };
            let value = trans.translate(expr.ast())?;
            trans.builder.ins().return_(&[value]);
            trans.builder.finalize();
        }

        let id = module
            .declare_function("formula", Linkage::Export, &ctx.func.signature)
            .map_err(compile_error)?;
        module
            .define_function(id, &mut ctx, &mut codegen::binemit::NullTrapSink {})
            .map_err(compile_error)?;
        module.clear_context(&mut ctx);
        module.finalize_definitions();

        let code = module.get_finalized_function(id);
        // The signature declared above is fn(f64) -> f64, and the code lives
        // as long as the module stored next to it.
        let function = unsafe { mem::transmute::<*const u8, fn(f64) -> f64>(code) };
        debug!("compiled {:?}", expr.formula());
        Ok(JIT {
            function,
            _module: module,
        })
    }

    /// Run the compiled formula at `x`
    pub fn call(&self, x: f64) -> f64 {
        (self.function)(x)
    }

    /// Run the compiled formula at every point of `xs`.
    pub fn call_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| (self.function)(x)).collect()
    }
}

/// State used for translating AST nodes into Cranelift IR.
struct FunctionTranslator<'a> {
    builder: FunctionBuilder<'a>,
    /// The function parameter
    x: Value,
    module: &'a mut Module<SimpleJITBackend>,
}

impl<'a> FunctionTranslator<'a> {
    fn translate(&mut self, ast: &Ast) -> Result<Value, Error> {
        let value = match *ast {
            Ast::Number(value) => self.builder.ins().f64const(Ieee64::with_float(value)),
            Ast::Variable => self.x,
            Ast::Neg(ref operand) => {
                let operand = self.translate(operand)?;
                self.builder.ins().fneg(operand)
            }
            Ast::Call(function, ref arg) => {
                let arg = self.translate(arg)?;
                self.translate_call(symbol(function).0, &[arg])?
            }
            Ast::Chain(ref first, ref rest) => {
                let mut lhs = self.translate(first)?;
                for &(op, ref operand) in rest {
                    let rhs = self.translate(operand)?;
                    lhs = match op {
                        Op::Plus => self.builder.ins().fadd(lhs, rhs),
                        Op::Minus => self.builder.ins().fsub(lhs, rhs),
                        Op::Mul => self.builder.ins().fmul(lhs, rhs),
                        Op::Div => self.builder.ins().fdiv(lhs, rhs),
                        Op::Exp => self.translate_call(POW, &[lhs, rhs])?,
                    };
                }
                lhs
            }
            Ast::Power(ref base, ref power) => {
                let base = self.translate(base)?;
                let power = self.translate(power)?;
                self.translate_call(POW, &[base, power])?
            }
        };
        Ok(value)
    }

    fn translate_call(&mut self, name: &str, args: &[Value]) -> Result<Value, Error> {
        let mut sig = self.module.make_signature();
        for _arg in args {
            sig.params.push(AbiParam::new(types::F64));
        }
        sig.returns.push(AbiParam::new(types::F64));

        let callee = self
            .module
            .declare_function(name, Linkage::Import, &sig)
            .map_err(compile_error)?;
        let local_callee = self
            .module
            .declare_func_in_func(callee, &mut self.builder.func);
        let call = self.builder.ins().call(local_callee, args);
        Ok(self.builder.inst_results(call)[0])
    }
}
