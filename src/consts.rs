// Global safety caps to prevent pathological or infinite loops.
// They bound worst-case latency on adversarial input; hitting one truncates
// the affected sub-parse and emits a diagnostic.

// Parser: maximum statements collected in a single block or switch case
pub const PARSER_MAX_BLOCK_STATEMENTS: usize = 100_000;
// Parser: maximum tokens captured into one opaque span (expression, header, condition)
pub const PARSER_MAX_SPAN_TOKENS: usize = 200_000;
// Parser: maximum members collected in a single type body
pub const PARSER_MAX_TYPE_MEMBERS: usize = 100_000;
// Parser: maximum nesting of blocks and statements before the subtree is skipped.
// Each level costs several recursive frames; this depth must fit a 2 MiB
// thread stack in unoptimized builds.
pub const PARSER_MAX_NESTING_DEPTH: usize = 48;
// Parser: number of recoverable errors tolerated before parsing stops
pub const PARSER_DEFAULT_MAX_ERRORS: usize = 100;

// Generator: defaults for the output layout
pub const GENERATOR_DEFAULT_INDENT_WIDTH: usize = 4;
pub const GENERATOR_DEFAULT_NEWLINE: &str = "\n";

// Marker comment placed in synthesized method and constructor bodies
pub const STUB_BODY_MARKER: &str = "// stub: body not available in summary";
