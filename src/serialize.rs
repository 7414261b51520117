use crate::error::MemberError;

/**Encodes a value (usually a member record) into the bincode wire form*/
pub fn to_bytes<T: ?Sized>(val: &T) -> Result<Vec<u8>, MemberError>
where
    T: serde::Serialize,
{
    Ok(bincode::serialize(val)?)
}

pub fn from_bytes<'a, T>(bytes: &'a [u8]) -> Result<T, MemberError>
where
    T: serde::de::Deserialize<'a>,
{
    Ok(bincode::deserialize(bytes)?)
}
