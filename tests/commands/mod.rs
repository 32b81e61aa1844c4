mod test_tally;
mod test_top;
