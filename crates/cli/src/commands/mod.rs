pub(crate) mod bootstrap;
pub(crate) mod serve;
pub(crate) mod teardown;
pub(crate) mod view;
