pub(crate) mod tester;
