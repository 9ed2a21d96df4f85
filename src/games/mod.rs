pub mod schafkopf;
