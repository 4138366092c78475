// bl-ast command-line entry point.
// Usage: bl-ast check <file.json> | bl-ast tree <file.json> [--procedure NAME]

fn main() -> miette::Result<()> {
    bl_ast::cli::run()
}
