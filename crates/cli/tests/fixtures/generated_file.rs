// Code generated by tool. DO NOT EDIT.

pub fn lookup(key: u32) -> u32 {
    let value = key;
    let value = value + 1;
    value
}
