pub(crate) mod processor;
