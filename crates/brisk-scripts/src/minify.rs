use crate::error::{Result, ScriptError};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

/// Compress and mangle a bundled script.
///
/// Input is the IIFE produced by the bundler, parsed as a classic script so
/// top-level names are not treated as module scope.
pub fn minify_js(code: &str) -> Result<String> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, code, SourceType::cjs()).parse();
    if let Some(error) = parsed.errors.first() {
        return Err(ScriptError::Minify(error.to_string()));
    }

    let mut program = parsed.program;
    let minified = Minifier::new(MinifierOptions::default()).minify(&allocator, &mut program);

    Ok(Codegen::new()
        .with_options(CodegenOptions::minify())
        .with_scoping(minified.scoping)
        .build(&program)
        .code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_shrinks_bundle() {
        let code = r#"(function() {
    function greet(name) {
        const message = "Hello, " + name;
        console.log(message);
    }
    greet("world");
})();
"#;
        let out = minify_js(code).unwrap();
        assert!(out.len() < code.len());
        assert!(out.contains("console.log"));
        assert!(!out.contains("\n    "));
    }

    #[test]
    fn test_minify_rejects_invalid_input() {
        let err = minify_js("function (").unwrap_err();
        assert!(matches!(err, ScriptError::Minify(_)));
    }
}
