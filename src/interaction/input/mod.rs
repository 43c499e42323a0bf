pub mod input_interaction;
