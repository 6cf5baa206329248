pub mod gateway;

#[cfg(test)]
mod test;
