use std::ops::{Deref, DerefMut};

use bytes::Buf;

use super::ByteOrder;
use crate::error::CodecError;

/// Reading position in a binary input together with the byte order currently in effect.
///
/// The byte order changes for the duration of every geometry node, see
/// [`ByteCursor::scoped_order`].
#[derive(Debug)]
pub struct ByteCursor<B> {
    buf: B,
    offset: usize,
    order: ByteOrder,
}

impl<B: Buf> ByteCursor<B> {
    /// Creates a cursor at the start of `buf`. The initial order is big endian.
    pub fn new(buf: B) -> Self {
        Self {
            buf,
            offset: 0,
            order: ByteOrder::default(),
        }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left.
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Byte order multi-byte values are currently read in.
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Switches the byte order until the returned guard is dropped, when the previous order is
    /// restored.
    pub fn scoped_order(&mut self, order: ByteOrder) -> OrderGuard<'_, B> {
        let saved = std::mem::replace(&mut self.order, order);
        OrderGuard {
            cursor: self,
            saved,
        }
    }

    fn ensure(&self, size: usize) -> Result<(), CodecError> {
        let remaining = self.buf.remaining();
        if remaining < size {
            return Err(CodecError::Truncated {
                offset: self.offset,
                needed: size - remaining,
            });
        }

        Ok(())
    }

    /// Reads a byte.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        self.ensure(1)?;
        self.offset += 1;
        Ok(self.buf.get_u8())
    }

    /// Reads an unsigned integer in the current byte order.
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        self.ensure(4)?;
        self.offset += 4;
        Ok(match self.order {
            ByteOrder::BigEndian => self.buf.get_u32(),
            ByteOrder::LittleEndian => self.buf.get_u32_le(),
        })
    }

    /// Reads a signed integer in the current byte order.
    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        self.ensure(4)?;
        self.offset += 4;
        Ok(match self.order {
            ByteOrder::BigEndian => self.buf.get_i32(),
            ByteOrder::LittleEndian => self.buf.get_i32_le(),
        })
    }

    /// Reads a double in the current byte order.
    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        self.ensure(8)?;
        self.offset += 8;
        Ok(match self.order {
            ByteOrder::BigEndian => self.buf.get_f64(),
            ByteOrder::LittleEndian => self.buf.get_f64_le(),
        })
    }

    /// Consumes the cursor returning the unread part of the input.
    pub fn into_inner(self) -> B {
        self.buf
    }
}

/// Restores the byte order of the cursor on drop.
#[derive(Debug)]
pub struct OrderGuard<'a, B: Buf> {
    cursor: &'a mut ByteCursor<B>,
    saved: ByteOrder,
}

impl<B: Buf> Deref for OrderGuard<'_, B> {
    type Target = ByteCursor<B>;

    fn deref(&self) -> &Self::Target {
        self.cursor
    }
}

impl<B: Buf> DerefMut for OrderGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor
    }
}

impl<B: Buf> Drop for OrderGuard<'_, B> {
    fn drop(&mut self) {
        self.cursor.order = self.saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn reads_in_active_order() {
        let bytes = [0u8, 0, 0, 1, 1, 0, 0, 0];
        let mut cursor = ByteCursor::new(&bytes[..]);
        assert_eq!(cursor.read_u32().unwrap(), 1);
        {
            let mut scoped = cursor.scoped_order(ByteOrder::LittleEndian);
            assert_eq!(scoped.read_u32().unwrap(), 1);
            assert_eq!(scoped.order(), ByteOrder::LittleEndian);
        }
        assert_eq!(cursor.order(), ByteOrder::BigEndian);
        assert_eq!(cursor.offset(), 8);
    }

    #[test]
    fn nested_scopes_restore_in_order() {
        let mut cursor = ByteCursor::new(&[0u8; 0][..]);
        {
            let mut outer = cursor.scoped_order(ByteOrder::LittleEndian);
            {
                let inner = outer.scoped_order(ByteOrder::BigEndian);
                assert_eq!(inner.order(), ByteOrder::BigEndian);
            }
            assert_eq!(outer.order(), ByteOrder::LittleEndian);
        }
        assert_eq!(cursor.order(), ByteOrder::BigEndian);
    }

    #[test]
    fn truncated() {
        let bytes = [0u8; 6];
        let mut cursor = ByteCursor::new(&bytes[..]);
        cursor.read_u8().unwrap();
        cursor.read_u8().unwrap();
        assert_matches!(
            cursor.read_f64(),
            Err(CodecError::Truncated {
                offset: 2,
                needed: 4
            })
        );
    }
}
