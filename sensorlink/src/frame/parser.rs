use nom::{
    bytes::complete::tag,
    character::complete::{char, space0},
    combinator::{all_consuming, value},
    multi::separated_list1,
    number::complete::float,
    sequence::delimited,
    IResult,
};

use super::{Frame, Reading, GREETING};
use crate::error::Error;

fn greeting(input: &str) -> IResult<&str, Frame> {
    value(Frame::Greeting, all_consuming(tag(GREETING)))(input)
}

/// A single decimal field, surrounding spaces are tolerated
fn field(input: &str) -> IResult<&str, f32> {
    delimited(space0, float, space0)(input)
}

fn fields(input: &str) -> IResult<&str, Vec<f32>> {
    all_consuming(separated_list1(char(','), field))(input)
}

pub(crate) fn parse_line(input: &str) -> Result<Frame, Error> {
    if let Ok((_, frame)) = greeting(input) {
        return Ok(frame);
    }
    let (_, values) =
        fields(input).map_err(|_| Error::InvalidLine(input.to_string()))?;
    if values.len() < 3 {
        return Err(Error::ShortFrame(values.len()));
    }
    Ok(Frame::Reading(Reading {
        horizontal: values[0],
        vertical: values[1],
        level: values[2],
    }))
}
