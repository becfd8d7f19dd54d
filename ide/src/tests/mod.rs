mod test_context;
mod test_conversion;
mod test_extension;
mod test_naming;
mod test_overrides;
mod test_ranking;
mod test_session;
