use super::*;

mod lex_test;
