mod metabolism;
mod movement;
mod reproduction;
