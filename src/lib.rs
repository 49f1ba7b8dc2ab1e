pub mod loss;
pub mod monitor;
pub mod packet;
pub mod sim;
pub mod source;
pub mod stats;

#[cfg(test)]
mod test;
