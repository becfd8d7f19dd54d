mod test_naming;
