mod parser_tests;
mod session_tests;
