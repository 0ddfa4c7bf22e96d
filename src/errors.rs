// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use errors::*;` or pick the names they need.
// Only running out of valid frontier cells is an expected outcome of carving, everything
// here is a contract violation that the caller sees.

use cells::CellPosition;

error_chain! {

    errors {
        InvalidDimension(width: usize, height: usize) {
            description("invalid grid dimension")
            display("invalid grid dimension {}x{}, width and height must both be at least 1",
                    width, height)
        }

        OutOfBounds(position: CellPosition, width: usize, height: usize) {
            description("grid coordinate out of bounds")
            display("cell {} is outside the {}x{} grid", position, width, height)
        }

        InvalidCarve(from: CellPosition, to: CellPosition) {
            description("invalid carve")
            display("cannot carve between {} and {}, cells must be distinct and axis aligned",
                    from, to)
        }

        AlgorithmDivergence(steps: usize, cap: usize) {
            description("maze generation did not terminate")
            display("generation still running after {} steps (cap {}), check the step size \
                     against the grid dimensions", steps, cap)
        }

        InvalidStepSize(step: usize) {
            description("invalid step size")
            display("step size {} is outside the supported range 1..=8", step)
        }

        SessionNotStarted {
            description("generation session not started")
            display("the session has no grid yet, start it before stepping")
        }

        InvalidMask(line: usize, reason: String) {
            description("invalid cell mask")
            display("invalid cell mask at line {}: {}", line, reason)
        }
    }
}
