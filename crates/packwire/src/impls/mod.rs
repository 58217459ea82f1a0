mod forward;
mod option;
mod primitive;
mod sequence;
mod string;
mod tuple;
